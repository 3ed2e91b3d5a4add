pub fn single_bit_index(bit: u128) -> usize {
    bit.trailing_zeros() as usize
}

/// Iterates the indexes of the set bits of a board, lowest first.
pub fn bit_indexes(board: u128) -> BitIndexes {
    BitIndexes { board }
}

#[derive(Clone, Copy, Debug)]
pub struct BitIndexes {
    board: u128,
}

impl Iterator for BitIndexes {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.board == 0 {
            return None;
        }

        let index = single_bit_index(self.board);
        self.board &= self.board - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.board.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitIndexes {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bit_index_first_bit() {
        assert_eq!(single_bit_index(0b1), 0);
    }

    #[test]
    fn test_single_bit_index_third_bit() {
        assert_eq!(single_bit_index(0b100), 2);
    }

    #[test]
    fn test_single_bit_index_last_bit() {
        assert_eq!(single_bit_index(0b1 << 127), 127);
    }

    #[test]
    fn test_bit_indexes_empty() {
        assert_eq!(bit_indexes(0).count(), 0);
    }

    #[test]
    fn test_bit_indexes_in_order() {
        let board = (1 << 127) | (1 << 64) | 0b1010;

        assert_eq!(bit_indexes(board).collect::<Vec<_>>(), vec![1, 3, 64, 127]);
        assert_eq!(bit_indexes(board).len(), 4);
    }
}
