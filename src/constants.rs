//! Constants used in the deploy scripts

/// The compiled taco shop token contract, as Micheline JSON
pub const TOKEN_CONTRACT_CODE: &str = include_str!("../artifacts/taco_shop_token.json");

/// The TZIP-16 metadata document embedded into the contract's storage
pub const CONTRACT_METADATA: &str = include_str!("../artifacts/metadata.json");

/// The TZIP-16 pointer stored under the empty metadata key, directing
/// readers to the `contents` entry of the same big map
pub const METADATA_POINTER: &str = "tezos-storage:contents";

/// The metadata big map key under which the metadata document is stored
pub const METADATA_CONTENTS_KEY: &str = "contents";

/// The default permit expiry, in seconds
pub const DEFAULT_PERMIT_EXPIRY_SECS: u64 = 3600;

/// The maximum permit expiry a user may configure, in seconds
pub const MAX_PERMIT_EXPIRY_SECS: u64 = 7200;

/// The fee attached to the origination operation, in mutez
pub const ORIGINATION_FEE_MUTEZ: u64 = 100_000;

/// The gas limit attached to the origination operation
pub const ORIGINATION_GAS_LIMIT: u64 = 100_000;

/// The storage limit attached to the origination operation, in bytes
pub const ORIGINATION_STORAGE_LIMIT: u64 = 10_000;

/// The balance transferred to the originated contract, in mutez
pub const ORIGINATION_BALANCE_MUTEZ: u64 = 0;

/// The number of times to poll the head block for the injected operation
/// before giving up on confirmation
pub const MAX_CONFIRMATION_POLLS: usize = 20;

/// The interval between confirmation polls, in milliseconds.
///
/// Shorter than the block time so an operation's block is not skipped over
/// between polls.
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 5_000;

/// The watermark byte prepended to manager operations before hashing for
/// signature
pub const OPERATION_WATERMARK: u8 = 0x03;

/// The base58check prefix of an ed25519 seed (`edsk`, 54-character form)
pub const ED25519_SEED_PREFIX: [u8; 4] = [13, 15, 58, 7];

/// The base58check prefix of an ed25519 secret key (`edsk`, 98-character
/// keypair form)
pub const ED25519_SECRET_KEY_PREFIX: [u8; 4] = [43, 246, 78, 7];

/// The base58check prefix of an ed25519 public key (`edpk`)
pub const ED25519_PUBLIC_KEY_PREFIX: [u8; 4] = [13, 15, 37, 217];

/// The base58check prefix of an ed25519 public key hash (`tz1`)
pub const ED25519_PUBLIC_KEY_HASH_PREFIX: [u8; 3] = [6, 161, 159];

/// The base58check prefix of an ed25519 signature (`edsig`)
pub const ED25519_SIGNATURE_PREFIX: [u8; 5] = [9, 245, 205, 134, 18];

/// The number of bytes in an ed25519 seed
pub const ED25519_SEED_BYTES: usize = 32;

/// The number of bytes in an ed25519 keypair (seed followed by public key)
pub const ED25519_KEYPAIR_BYTES: usize = 64;

/// The number of bytes in a public key hash
pub const PUBLIC_KEY_HASH_BYTES: usize = 20;

/// The number of bytes in an operation digest
pub const OPERATION_DIGEST_BYTES: usize = 32;
