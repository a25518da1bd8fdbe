/// Numeric conversion helpers.
///
/// This module provides safe functions for converting sample indices to
/// floating point and plot coordinates to the precision the SVG writer uses,
/// without silent data loss or infinite coordinates.
pub mod num;
