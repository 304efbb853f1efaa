/// Byte length of an encoded secret key (one canonical scalar).
pub const SECRET_KEY_SIZE: usize = 40;

/// Byte length of an encoded public key (one encoded curve point).
pub const PUBLIC_KEY_SIZE: usize = 40;

/// Byte length of an encoded signature (scalar s followed by scalar e).
pub const SIGNATURE_SIZE: usize = 80;

/// Byte length of a message hash (five base-field limbs).
pub const HASH_SIZE: usize = 40;
