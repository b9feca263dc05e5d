/// Lomb-Scargle periodogram, one frequency per thread iteration.
///
/// `y_dot[0]` is the precomputed `dot(y, y)`; zero disables normalization.
pub const LOMBSCARGLE: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_lombscargle(
            const int x_shape,
            const int freqs_shape,
            const {datatype} * __restrict__ x,
            const {datatype} * __restrict__ y,
            const {datatype} * __restrict__ freqs,
            {datatype} * __restrict__ pgram,
            const {datatype} * __restrict__ y_dot) {

        const int tx { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int stride { static_cast<int>( blockDim.x * gridDim.x ) };

        {datatype} yD {};
        if ( y_dot[0] == 0 ) {
            yD = 1;
        } else {
            yD = 2 / y_dot[0];
        }

        for ( int tid = tx; tid < freqs_shape; tid += stride ) {

            const {datatype} freq { freqs[tid] };

            {datatype} xc {};
            {datatype} xs {};
            {datatype} cc {};
            {datatype} ss {};
            {datatype} cs {};
            {datatype} c {};
            {datatype} s {};

            for ( int j = 0; j < x_shape; j++ ) {
                sincos( freq * x[j], &s, &c );
                xc += y[j] * c;
                xs += y[j] * s;
                cc += c * c;
                ss += s * s;
                cs += c * s;
            }

            const {datatype} tau { atan2( 2 * cs, cc - ss ) / ( 2 * freq ) };
            const {datatype} c_tau { cos( freq * tau ) };
            const {datatype} s_tau { sin( freq * tau ) };
            const {datatype} c_tau2 { c_tau * c_tau };
            const {datatype} s_tau2 { s_tau * s_tau };
            const {datatype} cs_tau { 2 * c_tau * s_tau };

            const {datatype} num_c { c_tau * xc + s_tau * xs };
            const {datatype} num_s { c_tau * xs - s_tau * xc };

            pgram[tid] = ( 0.5 * ( ( num_c * num_c ) / ( c_tau2 * cc + cs_tau * cs + s_tau2 * ss ) +
                                   ( num_s * num_s ) / ( c_tau2 * ss - cs_tau * cs + s_tau2 * cc ) ) ) * yD;
        }
    }
}
"#;
