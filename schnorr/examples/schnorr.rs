//! Generate a key pair, sign a digest, ship the public key and the
//! signature through bincode, and verify on the receiving side.

use rand::rngs::StdRng;
use rand::SeedableRng;
use schnorr::{MessageHash, Signature, SigningKey, VerifyingKey};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    let key = SigningKey::random(&mut rng).expect("key generation");
    let digest = MessageHash::from_le_bytes(&[7u8; 40]).expect("digest");
    let signature = key.sign(&mut rng, &digest).expect("signing");

    let vk_wire = bincode::serialize(&key.verifying_key()).expect("serialize key");
    let sig_wire = bincode::serialize(&signature).expect("serialize signature");
    println!(
        "wire sizes: public key {} bytes, signature {} bytes",
        vk_wire.len(),
        sig_wire.len()
    );

    let vk: VerifyingKey = bincode::deserialize(&vk_wire).expect("deserialize key");
    let sig: Signature = bincode::deserialize(&sig_wire).expect("deserialize signature");
    println!("verified: {}", vk.verify(&digest, &sig));
}
