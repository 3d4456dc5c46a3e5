/// Checked integer arithmetic helpers.
///
/// The language's integers are 64-bit and never wrap: every operation that
/// would leave the range is reported instead. Division rounds toward negative
/// infinity.
pub mod num;
