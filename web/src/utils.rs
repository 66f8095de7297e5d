/// Color generator seed from JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    let bytes: [u8; 8] = std::array::from_fn(|_| (256. * js_sys::Math::random()) as u8);
    u64::from_be_bytes(bytes)
}
