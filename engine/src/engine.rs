pub trait GameEngine {
    type Action;
    type State;
    type Player: Copy;
    type Terminal;

    /// Produces the state that results from `player` taking `action`. The input state is left untouched.
    fn take_action(
        &self,
        game_state: &Self::State,
        action: &Self::Action,
        player: Self::Player,
    ) -> Self::State;

    fn terminal_state(&self, game_state: &Self::State) -> Option<Self::Terminal>;
}

pub trait ValidActions {
    type Action;
    type State;
    type Player: Copy;

    fn valid_actions(&self, game_state: &Self::State, player: Self::Player) -> Vec<Self::Action>;
}
