use crossbeam::channel::Receiver;

/// A seat at the table. The turn owner asks the seat for an action at the start of each of its turns.
///
/// The action is delivered on the returned channel. A seat that gives up on the turn drops its sender,
/// so the receiver disconnects without ever yielding a value.
pub trait Controller {
    type Action;
    type State;

    fn on_turn(&mut self, game_state: &Self::State) -> Receiver<Self::Action>;

    fn on_end_turn(&mut self) {}
}
