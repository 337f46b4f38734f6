use proptest::prelude::*;

use web3_bip39::Mnemonic;
use web3_hd::{ChildNumber, DerivationPath, ExtendedKey, HdError, HARDENED_OFFSET};

fn child_strategy() -> impl Strategy<Value = ChildNumber> {
    (0u32..HARDENED_OFFSET, any::<bool>()).prop_map(|(index, hardened)| {
        if hardened {
            ChildNumber::Hardened(index)
        } else {
            ChildNumber::Normal(index)
        }
    })
}

fn path_strategy() -> impl Strategy<Value = DerivationPath> {
    prop::collection::vec(child_strategy(), 0..6)
        .prop_map(|children| DerivationPath::try_from(children).unwrap())
}

fn seed_strategy() -> impl Strategy<Value = Vec<u8>> {
    (16usize..=64).prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn path_display_roundtrip(path in path_strategy()) {
        let rendered = path.to_string();
        let parsed: DerivationPath = rendered.parse().unwrap();
        prop_assert_eq!(parsed, path);
    }

    #[test]
    fn public_derivation_matches_private(
        seed in seed_strategy(),
        indices in prop::collection::vec(0u32..HARDENED_OFFSET, 1..4),
    ) {
        let master = ExtendedKey::from_seed(&seed).unwrap();
        let path = DerivationPath::try_from(
            indices.iter().map(|&i| ChildNumber::Normal(i)).collect::<Vec<_>>(),
        )
        .unwrap();
        let private_child = master.derive(&path).unwrap();
        let public_child = master.neuter().derive(&path).unwrap();
        prop_assert_eq!(private_child.to_xpub(), public_child.to_xpub());
        prop_assert_eq!(private_child.depth() as usize, indices.len());
    }

    #[test]
    fn serialized_keys_roundtrip(seed in seed_strategy(), path in path_strategy()) {
        let key = ExtendedKey::from_seed(&seed).unwrap().derive(&path).unwrap();
        let xprv = key.to_xprv().unwrap();
        prop_assert_eq!(xprv.parse::<ExtendedKey>().unwrap(), key.clone());

        let public: ExtendedKey = key.to_xpub().parse().unwrap();
        prop_assert_eq!(public, key.neuter());
    }

    #[test]
    fn oversized_index_is_rejected(index in (HARDENED_OFFSET as u64)..=(u32::MAX as u64)) {
        let text = format!("m/{}'", index);
        let is_out_of_range = matches!(
            text.parse::<DerivationPath>(),
            Err(HdError::IndexOutOfRange(i)) if i == index
        );
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn unchecked_indices_never_derive(raw in HARDENED_OFFSET..=u32::MAX, hardened in any::<bool>()) {
        let master = ExtendedKey::from_seed(&[0x42; 32]).unwrap();
        let child = if hardened { ChildNumber::Hardened(raw) } else { ChildNumber::Normal(raw) };
        let is_out_of_range = matches!(
            master.derive_child(child),
            Err(HdError::IndexOutOfRange(i)) if i == raw as u64
        );
        prop_assert!(is_out_of_range);
        prop_assert!(DerivationPath::try_from(vec![child]).is_err());
    }
}

#[test]
fn mnemonic_seed_feeds_master_key() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("web3_hd=debug")
        .with_test_writer()
        .try_init();

    let mnemonic = Mnemonic::from_phrase(
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        "",
    )
    .unwrap();
    let master = ExtendedKey::from_seed(mnemonic.seed().as_bytes()).unwrap();
    let account = master.derive(&"m/44'/60'/0'/0/0".parse().unwrap()).unwrap();
    assert_eq!(
        account.private_key().unwrap().to_hex(),
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
    );
    assert_eq!(account.depth(), 5);
}
