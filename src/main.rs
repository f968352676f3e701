//! Demo driver: runs the whole pipeline over a UTF-8 message

use dlcrypt::{
    join_blocks, sign, split_blocks, verify, Block, Cipher, KeyPair, DEFAULT_BLOCK_BYTES,
    DEFAULT_PRIME_BITS,
};

fn main() -> dlcrypt::Result<()> {
    let message = "Hello, world of ElGamal + SHA1, and of terrifying safe primes!";
    let message_bytes = message.as_bytes();

    let blocks = split_blocks(message_bytes, DEFAULT_BLOCK_BYTES)?;
    println!("message: {message}");
    println!("blocks: {}", blocks.len());

    let keypair = KeyPair::generate(DEFAULT_PRIME_BITS)?;
    println!("keys: {keypair}, {}", keypair.public_key);

    let cipher = Cipher::new(keypair.public_key.clone());
    let packets = blocks
        .iter()
        .map(|b| cipher.encrypt(b.value()))
        .collect::<dlcrypt::Result<Vec<_>>>()?;
    println!("encrypted: {} packets", packets.len());

    let recovered = packets
        .iter()
        .zip(blocks.iter())
        .map(|(packet, block)| {
            let value = cipher.decrypt(packet, &keypair.private_key)?;
            Block::from_value(value, block.len())
        })
        .collect::<dlcrypt::Result<Vec<_>>>()?;
    let recovered_bytes = join_blocks(&recovered);
    println!(
        "decrypted: {}",
        String::from_utf8_lossy(&recovered_bytes)
    );

    let signatures = blocks
        .iter()
        .map(|b| sign(&b.to_bytes(), &keypair))
        .collect::<dlcrypt::Result<Vec<_>>>()?;
    let results = signatures
        .iter()
        .map(|sp| verify(sp, &keypair.public_key))
        .collect::<dlcrypt::Result<Vec<_>>>()?;
    println!("signatures verified: {:?}", results);

    Ok(())
}
