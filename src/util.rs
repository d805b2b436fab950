/// Numeric literal helpers.
///
/// Lattice files written for older MAD-style tools spell the exponent of a
/// double precision literal with `d` or `D` (`1.5d-3`). The helpers in this
/// module normalize those spellings before handing the text to the standard
/// `f64` parser.
pub mod num;
