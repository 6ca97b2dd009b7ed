//! Built-in knowledge entries for the convolution backprop drivers.
//!
//! Each entry pairs a shape key with a hand-tuned plan. Input keys list
//! `N Do Co1 Ho Wo Di Ci1 Hi Wi Dk Hk Wk sD sH sW padF padB padU padD padL padR dilD dilH dilW`;
//! filter keys drop `Di` and count channels per group. Value layouts are the
//! ones [`super::PrecomputedPlan::from_dx_row`] and
//! [`super::PrecomputedPlan::from_dw_row`] decode.

/// 16-bit input gradients, 24 cube cores.
pub(super) const DX_B16_24_CORES: &[([u64; 24], [u64; 34])] = &[
    (
        [1, 4, 15, 60, 60, 10, 15, 122, 122, 4, 4, 4, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 1, 1, 4, 1, 3, 2, 1, 1, 3782, 240, 15, 80, 5, 5, 1, 2, 2, 1, 2, 2, 256, 64, 80, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [16, 20, 86, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 3, 1, 8, 1, 1, 1, 6, 1, 128, 1364, 86, 256, 16, 20, 1, 2, 2, 1, 2, 2, 128, 16, 256, 1, 1, 1, 1, 1, 30, 15, 1, 1, 1],
    ),
    (
        [8, 20, 86, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 3, 1, 8, 1, 1, 1, 3, 1, 128, 1364, 86, 256, 16, 20, 1, 2, 2, 1, 2, 2, 128, 16, 256, 1, 1, 1, 1, 1, 30, 15, 1, 1, 1],
    ),
    (
        [8, 5, 171, 16, 16, 5, 32, 16, 16, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 3, 1, 4, 1, 2, 1, 3, 1, 64, 2730, 171, 256, 16, 5, 1, 2, 2, 1, 2, 2, 64, 16, 256, 1, 1, 1, 1, 1, 64, 16, 1, 1, 1],
    ),
    (
        [8, 5, 32, 16, 16, 5, 86, 16, 16, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 8, 1, 1, 1, 2, 1, 1, 1, 256, 512, 32, 688, 43, 5, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 8, 4, 1, 1, 1],
    ),
    (
        [4, 4, 4, 256, 256, 6, 4, 258, 258, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 2, 1, 12, 1, 1, 1, 2, 1, 5676, 64, 4, 64, 4, 6, 1, 2, 2, 1, 2, 2, 256, 48, 64, 2, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [4, 4, 16, 64, 64, 6, 16, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [22, 1, 1, 22, 1, 1, 1, 4, 1, 198, 256, 16, 256, 16, 6, 1, 2, 2, 1, 2, 2, 128, 48, 256, 2, 1, 1, 1, 1, 45, 3, 1, 1, 1],
    ),
    (
        [4, 4, 1, 256, 256, 6, 4, 258, 258, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 1, 1, 24, 1, 1, 1, 4, 1, 2838, 3, 1, 64, 4, 6, 1, 2, 2, 1, 2, 2, 256, 48, 64, 3, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 20, 16, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 6, 1, 4, 1, 1, 1, 3, 1, 256, 256, 16, 256, 16, 20, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [4, 4, 86, 64, 64, 4, 16, 64, 64, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 2, 1, 3, 1, 1, 4, 2, 1, 1408, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 4, 2, 1, 1, 1],
    ),
    (
        [1, 62, 16, 66, 66, 120, 16, 128, 128, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [24, 1, 1, 8, 1, 1, 3, 1, 1, 2048, 256, 16, 256, 16, 40, 1, 2, 2, 2, 2, 2, 128, 64, 128, 1, 1, 1, 1, 1, 8, 8, 1, 1, 1],
    ),
    (
        [1, 122, 16, 130, 130, 240, 1, 256, 256, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [24, 1, 1, 8, 1, 1, 3, 1, 1, 8192, 256, 16, 16, 1, 80, 1, 2, 2, 2, 1, 2, 256, 64, 16, 1, 1, 1, 1, 1, 16, 32, 1, 1, 1],
    ),
    (
        [1, 9, 16, 64, 64, 9, 16, 129, 129, 1, 3, 3, 1, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 1, 1, 8, 1, 1, 3, 1, 1, 2193, 256, 16, 256, 16, 3, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 7, 32, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [22, 1, 1, 11, 1, 2, 1, 1, 1, 96, 512, 32, 256, 16, 7, 1, 2, 2, 1, 2, 2, 96, 48, 256, 1, 1, 1, 1, 1, 75, 3, 1, 1, 1],
    ),
    (
        [1, 17, 8, 256, 256, 17, 16, 256, 256, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 20, 1, 1, 1, 1, 1, 3328, 128, 8, 256, 16, 17, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [1, 17, 8, 256, 256, 19, 1, 256, 256, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 20, 1, 1, 1, 1, 1, 3328, 128, 8, 16, 1, 19, 1, 2, 2, 1, 1, 1, 256, 48, 128, 1, 1, 1, 1, 1, 24, 12, 1, 1, 1],
    ),
    (
        [1, 17, 16, 128, 128, 17, 32, 128, 128, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 1024, 256, 16, 512, 32, 17, 1, 2, 2, 1, 2, 2, 128, 32, 256, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 17, 16, 128, 128, 19, 32, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 256, 16, 256, 16, 19, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 9, 16, 128, 128, 9, 8, 128, 128, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [19, 1, 1, 19, 1, 1, 1, 1, 1, 896, 256, 16, 128, 8, 9, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 17, 1, 256, 256, 19, 8, 256, 256, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 20, 1, 1, 1, 1, 1, 3328, 3, 1, 128, 8, 19, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 5, 32, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 1, 1, 8, 1, 2, 1, 1, 1, 128, 512, 32, 256, 16, 5, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 5, 16, 64, 64, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 256, 16, 5, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 7, 16, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 256, 16, 7, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 5, 32, 64, 64, 1, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 512, 32, 5, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 7, 32, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 512, 32, 7, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 9, 32, 128, 128, 9, 32, 128, 128, 1, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 512, 32, 256, 16, 9, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 1, 32, 32, 7, 32, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 64, 8, 1, 512, 32, 7, 1, 2, 2, 1, 1, 1, 64, 48, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [1, 62, 16, 66, 66, 120, 16, 128, 128, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [20, 1, 1, 4, 1, 1, 5, 1, 1, 4096, 256, 16, 256, 16, 24, 1, 2, 2, 2, 2, 2, 128, 64, 128, 1, 1, 1, 1, 1, 8, 8, 1, 1, 1],
    ),
    (
        [1, 122, 16, 130, 130, 240, 1, 256, 256, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [20, 1, 1, 4, 1, 1, 5, 1, 1, 16384, 256, 16, 16, 1, 48, 1, 2, 2, 2, 1, 2, 256, 64, 16, 1, 1, 1, 1, 1, 16, 32, 1, 1, 1],
    ),
    (
        [16, 20, 16, 32, 32, 22, 16, 34, 34, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 238, 256, 16, 256, 16, 11, 1, 2, 2, 1, 2, 2, 128, 48, 256, 1, 1, 1, 1, 1, 24, 6, 1, 1, 1],
    ),
    (
        [16, 20, 8, 64, 64, 22, 8, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 924, 128, 8, 128, 8, 11, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 60, 16, 64, 64, 122, 16, 130, 130, 4, 4, 4, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 5, 1, 2, 2, 1, 1, 3380, 256, 16, 128, 8, 61, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 12, 8, 1, 1, 1],
    ),
    (
        [1, 60, 8, 64, 64, 62, 16, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 5, 1, 2, 2, 1, 1, 924, 128, 8, 128, 8, 31, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 6, 3, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 7, 32, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 4, 1, 4, 1, 1, 1, 256, 512, 32, 128, 8, 7, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 9, 32, 64, 64, 11, 32, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 448, 512, 32, 256, 16, 11, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [16, 20, 86, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 1024, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 1, 1, 128, 64, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 20, 171, 16, 16, 20, 32, 16, 16, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 256, 2730, 171, 512, 32, 1, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 5, 171, 16, 16, 5, 32, 16, 16, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 4, 1, 1, 1, 1, 5, 4, 1, 256, 2730, 171, 512, 32, 1, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [4, 4, 171, 32, 32, 4, 32, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 4, 1, 2, 1, 2, 1, 1, 1, 512, 2730, 171, 256, 16, 4, 1, 2, 2, 1, 2, 2, 256, 16, 128, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 7, 1, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [14, 1, 1, 2, 1, 1, 7, 1, 1, 512, 512, 32, 4, 1, 1, 1, 2, 2, 1, 2, 2, 256, 48, 16, 1, 1, 1, 1, 1, 48, 24, 1, 1, 1],
    ),
    (
        [1, 25, 20, 40, 64, 25, 20, 40, 64, 3, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 4, 1, 1, 5, 1, 1, 640, 320, 20, 320, 20, 5, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 4, 2, 1, 1, 1],
    ),
    (
        [4, 4, 86, 64, 64, 4, 16, 64, 64, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 4, 1, 1, 1, 1, 4, 1, 1, 4096, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 4, 2, 1, 1, 1],
    ),
    (
        [8, 20, 86, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 8, 1, 1024, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 17, 16, 128, 128, 19, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 256, 16, 128, 8, 19, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 21, 3, 1, 1, 1],
    ),
    (
        [1, 9, 16, 128, 128, 11, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 256, 16, 128, 8, 11, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 21, 3, 1, 1, 1],
    ),
    (
        [4, 5, 32, 32, 32, 9, 32, 64, 64, 3, 3, 3, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [20, 4, 1, 5, 1, 1, 1, 1, 1, 832, 512, 32, 512, 32, 9, 1, 2, 2, 1, 2, 2, 208, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [16, 20, 1, 128, 128, 22, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 3380, 16, 1, 64, 4, 11, 1, 2, 2, 1, 1, 1, 336, 48, 64, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 20, 4, 128, 128, 20, 4, 128, 128, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 16384, 64, 4, 64, 4, 1, 1, 2, 2, 1, 1, 1, 512, 32, 64, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [16, 20, 4, 128, 128, 22, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 3380, 64, 4, 64, 4, 11, 1, 2, 2, 1, 2, 1, 336, 48, 64, 1, 1, 1, 1, 1, 6, 12, 1, 1, 1],
    ),
    (
        [16, 20, 8, 64, 64, 20, 4, 128, 128, 1, 3, 3, 1, 2, 2, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 16384, 128, 8, 64, 4, 1, 1, 2, 2, 1, 2, 1, 336, 48, 64, 1, 1, 1, 1, 1, 6, 24, 1, 1, 1],
    ),
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [24, 2, 1, 1, 1, 4, 3, 1, 1, 289, 512, 64, 64, 8, 1, 1, 2, 2, 1, 2, 2, 256, 32, 64, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [12, 2, 1, 1, 1, 2, 3, 1, 1, 289, 512, 64, 128, 16, 1, 1, 2, 2, 1, 2, 2, 256, 32, 128, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
];

/// 16-bit input gradients, 20 cube cores.
pub(super) const DX_B16_20_CORES: &[([u64; 24], [u64; 34])] = &[
    (
        [1, 17, 8, 256, 256, 17, 16, 256, 256, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 20, 1, 1, 1, 1, 1, 3328, 128, 8, 256, 16, 17, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [1, 17, 8, 256, 256, 19, 1, 256, 256, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 20, 1, 1, 1, 1, 1, 3328, 128, 8, 16, 1, 19, 1, 2, 2, 1, 1, 1, 256, 48, 128, 1, 1, 1, 1, 1, 24, 12, 1, 1, 1],
    ),
    (
        [1, 17, 16, 128, 128, 17, 32, 128, 128, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 1024, 256, 16, 512, 32, 17, 1, 2, 2, 1, 2, 2, 128, 32, 256, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 17, 16, 128, 128, 19, 32, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 256, 16, 256, 16, 19, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 9, 16, 128, 128, 9, 8, 128, 128, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [19, 1, 1, 19, 1, 1, 1, 1, 1, 896, 256, 16, 128, 8, 9, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 17, 1, 256, 256, 19, 8, 256, 256, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 20, 1, 1, 1, 1, 1, 3328, 3, 1, 128, 8, 19, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 5, 32, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 1, 1, 8, 1, 2, 1, 1, 1, 128, 512, 32, 256, 16, 5, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 5, 16, 64, 64, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 256, 16, 5, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 7, 16, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 256, 16, 7, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 5, 32, 64, 64, 1, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 512, 32, 5, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 32, 64, 64, 7, 32, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 256, 512, 32, 512, 32, 7, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 9, 32, 128, 128, 9, 32, 128, 128, 1, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 512, 32, 256, 16, 9, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 5, 1, 32, 32, 7, 32, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 16, 1, 1, 1, 1, 1, 64, 8, 1, 512, 32, 7, 1, 2, 2, 1, 1, 1, 64, 48, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [1, 62, 16, 66, 66, 120, 16, 128, 128, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [20, 1, 1, 4, 1, 1, 5, 1, 1, 4096, 256, 16, 256, 16, 24, 1, 2, 2, 2, 2, 2, 128, 64, 128, 1, 1, 1, 1, 1, 8, 8, 1, 1, 1],
    ),
    (
        [1, 122, 16, 130, 130, 240, 1, 256, 256, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [20, 1, 1, 4, 1, 1, 5, 1, 1, 16384, 256, 16, 16, 1, 48, 1, 2, 2, 2, 1, 2, 256, 64, 16, 1, 1, 1, 1, 1, 16, 32, 1, 1, 1],
    ),
    (
        [16, 20, 16, 32, 32, 22, 16, 34, 34, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 238, 256, 16, 256, 16, 11, 1, 2, 2, 1, 2, 2, 128, 48, 256, 1, 1, 1, 1, 1, 24, 6, 1, 1, 1],
    ),
    (
        [16, 20, 8, 64, 64, 22, 8, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 924, 128, 8, 128, 8, 11, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 60, 16, 64, 64, 122, 16, 130, 130, 4, 4, 4, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 5, 1, 2, 2, 1, 1, 3380, 256, 16, 128, 8, 61, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 12, 8, 1, 1, 1],
    ),
    (
        [1, 60, 8, 64, 64, 62, 16, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 5, 1, 2, 2, 1, 1, 924, 128, 8, 128, 8, 31, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 6, 3, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 7, 32, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [16, 1, 1, 4, 1, 4, 1, 1, 1, 256, 512, 32, 128, 8, 7, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [1, 9, 32, 64, 64, 11, 32, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 448, 512, 32, 256, 16, 11, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [16, 20, 86, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 1024, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 1, 1, 128, 64, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 20, 171, 16, 16, 20, 32, 16, 16, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 256, 2730, 171, 512, 32, 1, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 5, 171, 16, 16, 5, 32, 16, 16, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 4, 1, 1, 1, 1, 5, 4, 1, 256, 2730, 171, 512, 32, 1, 1, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [4, 4, 171, 32, 32, 4, 32, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 4, 1, 2, 1, 2, 1, 1, 1, 512, 2730, 171, 256, 16, 4, 1, 2, 2, 1, 2, 2, 256, 16, 128, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 5, 32, 32, 32, 7, 1, 32, 32, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [14, 1, 1, 2, 1, 1, 7, 1, 1, 512, 512, 32, 4, 1, 1, 1, 2, 2, 1, 2, 2, 256, 48, 16, 1, 1, 1, 1, 1, 48, 24, 1, 1, 1],
    ),
    (
        [1, 25, 20, 40, 64, 25, 20, 40, 64, 3, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 4, 1, 1, 5, 1, 1, 640, 320, 20, 320, 20, 5, 1, 2, 2, 1, 2, 2, 256, 64, 128, 1, 1, 1, 1, 1, 4, 2, 1, 1, 1],
    ),
    (
        [4, 4, 86, 64, 64, 4, 16, 64, 64, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [16, 4, 1, 1, 1, 1, 4, 1, 1, 4096, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 4, 2, 1, 1, 1],
    ),
    (
        [8, 20, 86, 32, 32, 20, 16, 32, 32, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 8, 1, 1024, 1364, 86, 256, 16, 1, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
    ),
    (
        [1, 17, 16, 128, 128, 19, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 256, 16, 128, 8, 19, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 21, 3, 1, 1, 1],
    ),
    (
        [1, 9, 16, 128, 128, 11, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 10, 1, 2, 1, 1, 1, 1664, 256, 16, 128, 8, 11, 1, 2, 2, 1, 2, 2, 256, 48, 128, 1, 1, 1, 1, 1, 21, 3, 1, 1, 1],
    ),
    (
        [4, 5, 32, 32, 32, 9, 32, 64, 64, 3, 3, 3, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        [20, 4, 1, 5, 1, 1, 1, 1, 1, 832, 512, 32, 512, 32, 9, 1, 2, 2, 1, 2, 2, 208, 48, 128, 1, 1, 1, 1, 1, 12, 12, 1, 1, 1],
    ),
    (
        [16, 20, 1, 128, 128, 22, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 3380, 16, 1, 64, 4, 11, 1, 2, 2, 1, 1, 1, 336, 48, 64, 1, 1, 1, 1, 1, 3, 3, 1, 1, 1],
    ),
    (
        [16, 20, 4, 128, 128, 20, 4, 128, 128, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 16384, 64, 4, 64, 4, 1, 1, 2, 2, 1, 1, 1, 512, 32, 64, 1, 1, 1, 1, 1, 2, 2, 1, 1, 1],
    ),
    (
        [16, 20, 4, 128, 128, 22, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 2, 1, 5, 1, 1, 2, 8, 1, 3380, 64, 4, 64, 4, 11, 1, 2, 2, 1, 2, 1, 336, 48, 64, 1, 1, 1, 1, 1, 6, 12, 1, 1, 1],
    ),
    (
        [16, 20, 8, 64, 64, 20, 4, 128, 128, 1, 3, 3, 1, 2, 2, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 20, 16, 1, 16384, 128, 8, 64, 4, 1, 1, 2, 2, 1, 2, 1, 336, 48, 64, 1, 1, 1, 1, 1, 6, 24, 1, 1, 1],
    ),
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [24, 2, 1, 1, 1, 4, 3, 1, 1, 289, 512, 64, 64, 8, 1, 1, 2, 2, 1, 2, 2, 256, 32, 64, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [12, 2, 1, 1, 1, 2, 3, 1, 1, 289, 512, 64, 128, 16, 1, 1, 2, 2, 1, 2, 2, 256, 32, 128, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
];

/// f32 input gradients, 24 cube cores.
pub(super) const DX_F32_24_CORES: &[([u64; 24], [u64; 34])] = &[
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [24, 2, 1, 1, 1, 4, 3, 1, 1, 289, 512, 64, 64, 8, 1, 1, 2, 2, 1, 2, 2, 256, 32, 64, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [12, 2, 1, 1, 1, 2, 3, 1, 1, 289, 512, 64, 128, 16, 1, 1, 2, 2, 1, 2, 2, 256, 32, 128, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
];

/// f32 input gradients, 20 cube cores.
pub(super) const DX_F32_20_CORES: &[([u64; 24], [u64; 34])] = &[
    (
        [2, 4, 64, 18, 18, 3, 32, 17, 17, 4, 4, 4, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 1, 1],
        [12, 2, 1, 1, 1, 2, 3, 1, 1, 289, 512, 64, 128, 16, 1, 1, 2, 2, 1, 2, 2, 256, 32, 128, 3, 1, 1, 1, 1, 48, 8, 1, 1, 1],
    ),
];

/// f32 basic-block kernels, 24 cube cores.
pub(super) const DX_F32_BASIC_24_CORES: &[([u64; 24], [u64; 34])] = &[
    (
        [4, 6, 8, 112, 112, 17, 1, 229, 229, 7, 7, 7, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [24, 1, 1, 1, 1, 1, 1, 1, 1, 10534, 64, 8, 8, 1, 1, 1, 2, 2, 1, 2, 2, 1024, 8, 16, 1, 1, 1, 1, 1, 49, 196, 1, 1, 1],
    ),
];

/// f32 basic-block kernels, 20 cube cores.
pub(super) const DX_F32_BASIC_20_CORES: &[([u64; 24], [u64; 34])] = &[
    (
        [4, 6, 8, 112, 112, 17, 1, 229, 229, 7, 7, 7, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 1, 1, 1, 10534, 64, 8, 8, 1, 1, 1, 2, 2, 1, 2, 2, 1024, 8, 16, 1, 1, 1, 1, 1, 49, 196, 1, 1, 1],
    ),
];

/// 16-bit filter gradients, 20 cube cores.
pub(super) const DW_B16_20_CORES: &[([u64; 23], [u64; 26])] = &[
    (
        [1, 9, 32, 64, 64, 32, 64, 64, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 2, 5, 2, 9, 1, 1, 256, 768, 13, 2, 2, 1, 1, 1, 128, 64, 256, 1, 1, 13, 13, 1, 61440],
    ),
    (
        [1, 17, 8, 256, 256, 8, 256, 256, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 10, 2, 17, 1, 1, 128, 192, 26, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [1, 17, 16, 128, 128, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 5, 4, 17, 1, 1, 256, 192, 26, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [1, 17, 16, 128, 128, 32, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 10, 2, 17, 1, 1, 256, 768, 13, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [1, 9, 16, 128, 128, 8, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 10, 2, 9, 1, 1, 256, 192, 13, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [1, 9, 16, 128, 128, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 5, 4, 9, 1, 1, 256, 192, 26, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [16, 20, 4, 128, 128, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 16, 1, 1, 64, 192, 128, 2, 2, 1, 2, 2, 64, 64, 256, 1, 1, 8, 8, 1, 98304],
    ),
    (
        [16, 20, 8, 64, 64, 8, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 16, 1, 1, 128, 384, 64, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
];

/// 16-bit filter gradients, 24 cube cores.
pub(super) const DW_B16_24_CORES: &[([u64; 23], [u64; 26])] = &[
    (
        [16, 20, 1, 128, 128, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [2, 1, 1, 1, 6, 2, 160, 1, 1, 16, 96, 22, 2, 2, 2, 2, 1, 16, 16, 864, 1, 1, 176, 44, 1, 112320],
    ),
    (
        [8, 20, 1, 128, 128, 4, 130, 130, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [2, 1, 1, 1, 6, 2, 80, 1, 1, 16, 96, 22, 2, 2, 2, 2, 1, 16, 16, 864, 1, 1, 176, 44, 1, 112320],
    ),
    (
        [1, 62, 16, 66, 66, 16, 128, 128, 4, 4, 4, 2, 2, 2, 3, 3, 3, 3, 3, 3, 1, 1, 1],
        [1, 1, 1, 1, 22, 1, 62, 1, 1, 256, 1024, 3, 2, 2, 1, 1, 1, 128, 64, 256, 1, 1, 4, 4, 1, 27392],
    ),
    (
        [1, 9, 16, 128, 128, 16, 128, 128, 3, 3, 3, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 2, 3, 4, 9, 1, 1, 128, 192, 43, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [16, 20, 8, 64, 64, 8, 66, 66, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [20, 1, 1, 1, 1, 1, 16, 1, 1, 128, 384, 64, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [16, 20, 16, 32, 32, 16, 34, 34, 3, 3, 3, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [8, 1, 1, 1, 1, 3, 40, 1, 1, 256, 256, 32, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
    (
        [1, 60, 16, 64, 64, 16, 130, 130, 4, 4, 4, 2, 2, 2, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        [6, 1, 1, 1, 4, 1, 10, 1, 1, 256, 1024, 16, 2, 2, 1, 2, 2, 128, 64, 256, 1, 1, 4, 4, 1, 131072],
    ),
];
