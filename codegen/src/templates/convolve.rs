//! Direct convolution and correlation, 1D and 2D.
//!
//! `offset` selects the output window (full/same/valid) and is computed by
//! the caller. Every thread strides over the output grid.

pub const CONVOLVE: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_convolve(
            const {datatype} * __restrict__ inp,
            const int inpW,
            const {datatype} * __restrict__ kernel,
            const int kerW,
            const int offset,
            {datatype} * __restrict__ out,
            const int outW) {

        const int tx { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int stride { static_cast<int>( blockDim.x * gridDim.x ) };

        for ( int i = tx; i < outW; i += stride ) {
            {datatype} temp {};
            for ( int j = 0; j < kerW; j++ ) {
                const int k = i + offset - j;
                if ( k >= 0 && k < inpW ) {
                    temp += inp[k] * kernel[j];
                }
            }
            out[i] = temp;
        }
    }
}
"#;

pub const CORRELATE: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_correlate(
            const {datatype} * __restrict__ inp,
            const int inpW,
            const {datatype} * __restrict__ kernel,
            const int kerW,
            const int offset,
            {datatype} * __restrict__ out,
            const int outW) {

        const int tx { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int stride { static_cast<int>( blockDim.x * gridDim.x ) };

        for ( int i = tx; i < outW; i += stride ) {
            {datatype} temp {};
            for ( int j = 0; j < kerW; j++ ) {
                const int k = i + offset + j - ( kerW - 1 );
                if ( k >= 0 && k < inpW ) {
                    temp += inp[k] * kernel[j];
                }
            }
            out[i] = temp;
        }
    }
}
"#;

pub const CONVOLVE_2D: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_convolve_2d(
            const {datatype} * __restrict__ inp,
            const int inpW,
            const int inpH,
            const {datatype} * __restrict__ kernel,
            const int kerW,
            const int kerH,
            const int offsetW,
            const int offsetH,
            {datatype} * __restrict__ out,
            const int outW,
            const int outH) {

        const int ty { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int tx { static_cast<int>( blockIdx.y * blockDim.y + threadIdx.y ) };

        if ( tx >= outH || ty >= outW ) {
            return;
        }

        {datatype} temp {};
        for ( int r = 0; r < kerH; r++ ) {
            const int row = tx + offsetH - r;
            if ( row < 0 || row >= inpH ) {
                continue;
            }
            for ( int c = 0; c < kerW; c++ ) {
                const int col = ty + offsetW - c;
                if ( col >= 0 && col < inpW ) {
                    temp += inp[row * inpW + col] * kernel[r * kerW + c];
                }
            }
        }
        out[tx * outW + ty] = temp;
    }
}
"#;

pub const CORRELATE_2D: &str = r#"
{header}

extern "C" {
    __global__ void sigkern_correlate_2d(
            const {datatype} * __restrict__ inp,
            const int inpW,
            const int inpH,
            const {datatype} * __restrict__ kernel,
            const int kerW,
            const int kerH,
            const int offsetW,
            const int offsetH,
            {datatype} * __restrict__ out,
            const int outW,
            const int outH) {

        const int ty { static_cast<int>( blockIdx.x * blockDim.x + threadIdx.x ) };
        const int tx { static_cast<int>( blockIdx.y * blockDim.y + threadIdx.y ) };

        if ( tx >= outH || ty >= outW ) {
            return;
        }

        {datatype} temp {};
        for ( int r = 0; r < kerH; r++ ) {
            const int row = tx + offsetH + r - ( kerH - 1 );
            if ( row < 0 || row >= inpH ) {
                continue;
            }
            for ( int c = 0; c < kerW; c++ ) {
                const int col = ty + offsetW + c - ( kerW - 1 );
                if ( col >= 0 && col < inpW ) {
                    temp += inp[row * inpW + col] * kernel[r * kerW + c];
                }
            }
        }
        out[tx * outW + ty] = temp;
    }
}
"#;
