//! Constants for board dimensions, text glyphs, and driver parameters.
//!
//! The engine itself takes the board size at construction time; the values
//! here are the defaults the command line and the text protocol fall back to.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard sizes are 9, 13, or 19.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest size that can be addressed with letter/number vertices.
///
/// Columns are labelled `A`..`Z` skipping `I`, which leaves 25 letters.
pub const MAX_LABELLED_SIZE: usize = 25;

// =============================================================================
// Text Glyphs
// =============================================================================

/// Glyph for a Black stone in board diagrams.
pub const GLYPH_BLACK: char = 'X';

/// Glyph for a White stone in board diagrams.
pub const GLYPH_WHITE: char = 'O';

/// Glyph for an empty intersection in board diagrams.
pub const GLYPH_EMPTY: char = '.';

// =============================================================================
// Playout Parameters
// =============================================================================

/// Seed used by `selfplay` when none is given.
pub const DEFAULT_PLAYOUT_SEED: u64 = 1;

/// Move-attempt limit for a playout, as a multiple of the board area.
///
/// Captures reopen intersections, so a filled board can take longer than
/// `size * size` placements.
pub const PLAYOUT_LEN_FACTOR: usize = 3;

/// Move-attempt limit for a self-play game on a board of the given size.
pub const fn max_game_len(size: usize) -> usize {
    size * size * PLAYOUT_LEN_FACTOR
}
