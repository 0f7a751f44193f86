//! Fixed vectors for the CKB Blake2b tree.

use anyhow::Result;
use ckb_smt::{parse_hash_hex, CkbBlake2bHasher, SmtProof, SparseMerkleTree, ZERO_HASH};

type Tree = SparseMerkleTree<CkbBlake2bHasher>;

struct Vector {
    key: &'static str,
    value: &'static str,
    root_after: &'static str,
    final_proof: &'static str,
}

const VECTORS: [Vector; 3] = [
    Vector {
        key: "0xa9bb945be71f0bd2757d33d2465b6387383da42f321072e47472f0c9c7428a8a",
        value: "0xa939a47335f777eac4c40fbc0970e25f832a24e1d55adc45a7b76d63fe364e82",
        root_after: "0x5faa7bccd1095c904fe34c99236f0734f909823d8d48b81b0b92bab531f372c1",
        final_proof: "0x00000000000000000000000000000000000000000000000000000000000000033f2a0a59ba1081f2d343682b200a778191a4e5838a46774eda8e1ee201c6cb2fa9cee9b111fddde5dd16c6684715587ba628bf73407e03e9db579e41af0c09b8",
    },
    Vector {
        key: "0x381dc5391dab099da5e28acd1ad859a051cf18ace804d037f12819c6fbc0e18b",
        value: "0x9158ce9b0e11dd150ba2ae5d55c1db04b1c5986ec626f2e38a93fe8ad0b2923b",
        root_after: "0x991175c5349e2b0ea459aa541be38c14e2d238a67bb75129f0db00043b485445",
        final_proof: "0x0000000000000000000000000000000000000000000000000000000000000001b70128add4d8437d43aa590f4fbc4535907e420c84efe39258a61ce2e2132b33",
    },
    Vector {
        key: "0xe8c0265680a02b680b6cbc880348f062b825b28e237da7169aded4bcac0a04e5",
        value: "0x2ca41595841e46ce8e74ad749e5c3f1d17202150f99c3d8631233ebdd19b19eb",
        root_after: "0x35500363552cb7b3f51ac929b87c5b38e08555b2094bfb3b96b09271f7541f33",
        final_proof: "0x00000000000000000000000000000000000000000000000000000000000000035faa7bccd1095c904fe34c99236f0734f909823d8d48b81b0b92bab531f372c1a9cee9b111fddde5dd16c6684715587ba628bf73407e03e9db579e41af0c09b8",
    },
];

fn build() -> Result<Tree> {
    let mut tree = Tree::new();
    for vector in &VECTORS {
        tree.update(parse_hash_hex(vector.key)?, parse_hash_hex(vector.value)?)?;
        assert_eq!(tree.root(), parse_hash_hex(vector.root_after)?, "root after {}", vector.key);
    }
    Ok(tree)
}

#[test]
fn test_roots_match_vectors() -> Result<()> {
    build()?;
    Ok(())
}

#[test]
fn test_proofs_match_vectors() -> Result<()> {
    let tree = build()?;
    for vector in &VECTORS {
        let proof = tree.proof(parse_hash_hex(vector.key)?)?;
        assert_eq!(proof.to_hex(), vector.final_proof, "proof for {}", vector.key);
    }
    Ok(())
}

#[test]
fn test_recorded_proofs_verify() -> Result<()> {
    let root = parse_hash_hex(VECTORS[2].root_after)?;
    for vector in &VECTORS {
        let key = parse_hash_hex(vector.key)?;
        let value = parse_hash_hex(vector.value)?;
        let proof = SmtProof::from_hex(vector.final_proof)?;

        assert!(Tree::verify(key, value, &proof, root)?);
        assert!(!Tree::verify(key, ZERO_HASH, &proof, root)?);
        assert!(!Tree::verify(key, value, &proof, parse_hash_hex(VECTORS[0].root_after)?)?);
    }
    Ok(())
}

#[test]
fn test_raw_proof_bytes_verify() -> Result<()> {
    let vector = &VECTORS[1];
    let bytes = ckb_smt::decode_hex(&vector.final_proof.to_uppercase())?;
    assert!(Tree::verify(
        parse_hash_hex(vector.key)?,
        parse_hash_hex(vector.value)?,
        bytes,
        parse_hash_hex(VECTORS[2].root_after)?,
    )?);
    Ok(())
}

#[test]
fn test_deleting_back_to_earlier_roots() -> Result<()> {
    let mut tree = build()?;
    tree.delete(parse_hash_hex(VECTORS[2].key)?)?;
    assert_eq!(tree.root(), parse_hash_hex(VECTORS[1].root_after)?);
    tree.update(parse_hash_hex(VECTORS[1].key)?, ZERO_HASH)?;
    assert_eq!(tree.root(), parse_hash_hex(VECTORS[0].root_after)?);
    tree.delete(parse_hash_hex(VECTORS[0].key)?)?;
    assert_eq!(tree.root(), ZERO_HASH);
    assert!(tree.is_empty());
    Ok(())
}
