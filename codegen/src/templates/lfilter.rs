/// Direct-form IIR filter.
///
/// Parameters: `(x_len, a_len, b_len, x, a, b, out)`. Launched as a single
/// thread: `out[t]` reads `out[t - 1]`, `out[t - 2]`, ..., so the scan must
/// visit `t` in increasing order. The numerator sum is bounded by `b_len`
/// so a numerator shorter than the denominator is read as zero-padded.
pub const LFILTER: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_lfilter(
            const int x_len,
            const int a_len,
            const int b_len,
            const {datatype} * __restrict__ x,
            const {datatype} * __restrict__ a,
            const {datatype} * __restrict__ b,
            {datatype} * __restrict__ out) {

        for ( int t = 0; t < x_len; t++ ) {

            // No samples exist before index 0.
            const int window = ( t < a_len - 1 ) ? t : a_len - 1;
            const int taps = ( window < b_len - 1 ) ? window : b_len - 1;

            {datatype} isw {};
            {datatype} wos {};

            for ( int i = 0; i <= taps; i++ ) {
                isw += x[t - i] * b[i];
            }
            for ( int i = 1; i <= window; i++ ) {
                wos += out[t - i] * a[i];
            }

            out[t] = ( isw - wos ) / a[0];
        }
    }
}
"#;
