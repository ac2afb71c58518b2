/// Linear interpolation between `(x0, y0)` and `(x1, y1)` at `x`.
///
/// Division truncates toward zero. Spans of two `i32`s need 33 bits, so
/// their product needs 66 and is computed in `i128`.
pub fn interpolate(x0: i32, x1: i32, y0: i32, y1: i32, x: i32) -> i32 {
    debug_assert!(x1 > x0, "breakpoint inputs must be strictly increasing");

    let (x0, x1, y0, y1, x) = (
        i128::from(x0),
        i128::from(x1),
        i128::from(y0),
        i128::from(y1),
        i128::from(x),
    );

    ((x - x0) * (y1 - y0) / (x1 - x0) + y0) as i32
}
