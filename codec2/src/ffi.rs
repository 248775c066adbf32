//! FFI bindings to libcodec2.

use std::os::raw::{c_int, c_short, c_uchar};

/// Opaque codec state.
pub enum Codec2 {}

unsafe extern "C" {
    pub fn codec2_create(mode: c_int) -> *mut Codec2;

    pub fn codec2_destroy(codec2_state: *mut Codec2);

    // `speech_in` is declared non-const upstream but only read.
    pub fn codec2_encode(
        codec2_state: *mut Codec2,
        bytes: *mut c_uchar,
        speech_in: *const c_short,
    );

    pub fn codec2_decode(
        codec2_state: *mut Codec2,
        speech_out: *mut c_short,
        bytes: *const c_uchar,
    );

    pub fn codec2_samples_per_frame(codec2_state: *mut Codec2) -> c_int;

    pub fn codec2_bytes_per_frame(codec2_state: *mut Codec2) -> c_int;
}
