/// Numeric conversion helpers.
///
/// Provides the checked float-to-integer conversions the bitwise operators
/// rely on.
pub mod num;
