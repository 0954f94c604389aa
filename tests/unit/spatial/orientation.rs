//! Tests for positions, orientations and neighbour iteration

#[cfg(test)]
mod tests {
    use wavecollapse::spatial::orientation::neighbours;
    use wavecollapse::spatial::{Orientation, Position};

    // Tests indices are stable and cover 0..COUNT
    // Verified by giving two orientations the same index
    #[test]
    fn test_indices_unique() {
        for (expected, orientation) in Orientation::ALL.into_iter().enumerate() {
            assert_eq!(orientation.index(), expected);
        }
    }

    // Tests opposites negate the offset and are involutive
    // Verified by mapping NorthEast to NorthWest
    #[test]
    fn test_opposite() {
        for orientation in Orientation::ALL {
            let (dx, dy) = orientation.offset();
            assert_eq!(orientation.opposite().offset(), (-dx, -dy));
            assert_eq!(orientation.opposite().opposite(), orientation);
        }
    }

    // Tests the diagonal and cardinal partitions
    // Verified by marking North as diagonal
    #[test]
    fn test_diagonals() {
        let diagonal = Orientation::ALL.iter().filter(|o| o.is_diagonal()).count();
        assert_eq!(diagonal, 4);
        assert!(Orientation::CARDINAL.iter().all(|o| !o.is_diagonal()));
    }

    // Tests stepping stays inside the grid
    // Verified by allowing x == width
    #[test]
    fn test_step_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(Orientation::West.step(corner, 3, 3), None);
        assert_eq!(Orientation::North.step(corner, 3, 3), None);
        assert_eq!(Orientation::SouthEast.step(corner, 3, 3), Some(Position::new(1, 1)));
        assert_eq!(Orientation::East.step(Position::new(2, 0), 3, 3), None);
    }

    // Tests neighbour counts at corners, edges and interior cells
    // Verified by including out-of-bounds neighbours
    #[test]
    fn test_neighbour_counts() {
        assert_eq!(neighbours(Position::new(0, 0), 3, 3).count(), 3);
        assert_eq!(neighbours(Position::new(1, 0), 3, 3).count(), 5);
        assert_eq!(neighbours(Position::new(1, 1), 3, 3).count(), 8);
        assert_eq!(neighbours(Position::new(0, 0), 1, 1).count(), 0);
    }

    // Tests linear indexing round trips in row-major order
    // Verified by using the height as the row stride
    #[test]
    fn test_linear_index() {
        let position = Position::new(2, 3);
        assert_eq!(position.linear_index(5), 17);
        assert_eq!(Position::from_linear_index(17, 5), position);
    }
}
