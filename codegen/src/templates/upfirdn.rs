//! Polyphase upsample → FIR → downsample.
//!
//! `h_trans_flip` holds the filter reshaped per phase and flipped; each phase
//! has `h_per_phase` taps.

pub const UPFIRDN_1D: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_upfirdn_1d(
            const {datatype} * __restrict__ inp,
            const {datatype} * __restrict__ h_trans_flip,
            const int up,
            const int down,
            const int x_shape_a,
            const int h_per_phase,
            const int padded_len,
            {datatype} * __restrict__ out,
            const int outW) {

        const int t { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int stride { static_cast<int>( blockDim.x * gridDim.x ) };

        for ( int tid = t; tid < outW; tid += stride ) {
            const int x_idx { static_cast<int>( ( tid * down ) / up ) % padded_len };
            int h_idx { ( tid * down ) % up * h_per_phase };
            int x_conv_idx { x_idx - h_per_phase + 1 };

            if ( x_conv_idx < 0 ) {
                h_idx -= x_conv_idx;
                x_conv_idx = 0;
            }

            {datatype} temp {};
            for ( int x_c = x_conv_idx; x_c < ( x_idx + 1 ); x_c++ ) {
                if ( x_c < x_shape_a && x_c >= 0 ) {
                    temp += inp[x_c] * h_trans_flip[h_idx];
                }
                h_idx += 1;
            }
            out[tid] = temp;
        }
    }
}
"#;

pub const UPFIRDN_2D: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_upfirdn_2d(
            const {datatype} * __restrict__ inp,
            const int inpW,
            const {datatype} * __restrict__ h_trans_flip,
            const int up,
            const int down,
            const int x_shape_a,
            const int h_per_phase,
            const int padded_len,
            {datatype} * __restrict__ out,
            const int outW,
            const int outH) {

        const int y { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int x { static_cast<int>( blockIdx.y * blockDim.y + threadIdx.y ) };

        if ( x >= outH || y >= outW ) {
            return;
        }

        const int x_idx { static_cast<int>( ( y * down ) / up ) % padded_len };
        int h_idx { ( y * down ) % up * h_per_phase };
        int x_conv_idx { x_idx - h_per_phase + 1 };

        if ( x_conv_idx < 0 ) {
            h_idx -= x_conv_idx;
            x_conv_idx = 0;
        }

        {datatype} temp {};
        for ( int x_c = x_conv_idx; x_c < ( x_idx + 1 ); x_c++ ) {
            if ( x_c < x_shape_a && x_c >= 0 ) {
                temp += inp[x * inpW + x_c] * h_trans_flip[h_idx];
            }
            h_idx += 1;
        }
        out[x * outW + y] = temp;
    }
}
"#;
