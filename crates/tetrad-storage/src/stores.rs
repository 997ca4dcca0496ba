//! On-disk layout and per-store RocksDB tuning.
//!
//! One logical store base path fans out into six physical RocksDB
//! directories, one per quad index layout plus the two namespace maps. Each
//! directory is a full standalone database; nothing above RocksDB ties them
//! together.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use rocksdb::{BlockBasedOptions, Cache, Options};

use crate::keys::compare_keys;
use crate::rocksdb_backend::StoreConfig;

/// Directory name suffixes of the six physical stores.
pub mod store_suffixes {
    pub const SPOC: &str = "spoc";
    pub const CSPO: &str = "cspo";
    pub const OPSC: &str = "opsc";
    pub const PCOS: &str = "pcos";
    pub const NS_PREFIX: &str = "ns_prefix";
    pub const NS_URL: &str = "ns_url";

    /// All six suffixes, listed in commit order.
    pub const ALL: [&str; 6] = [PCOS, OPSC, CSPO, SPOC, NS_PREFIX, NS_URL];
}

const BLOOM_FILTER_BITS: f64 = 10.0;
const COMPARATOR_NAME: &str = "tetrad.bytewise";

/// Directory of one physical store: the base path with `_suffix` appended
/// to its final component.
pub fn store_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!("_{suffix}"));
    PathBuf::from(name)
}

/// Options for the four quad index stores: byte-wise comparator, shared
/// block cache, and bloom filters sized for point reads on 64-byte keys.
pub fn quad_store_options(config: &StoreConfig, cache: &Cache) -> Options {
    let mut opts = base_options(config);
    opts.set_comparator(COMPARATOR_NAME, Box::new(compare_keys));

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_bloom_filter(BLOOM_FILTER_BITS, false);
    opts.set_block_based_table_factory(&block_opts);

    opts
}

/// Options for the two namespace stores. Namespace maps are tiny; the
/// engine defaults are enough.
pub fn namespace_store_options(config: &StoreConfig) -> Options {
    base_options(config)
}

fn base_options(config: &StoreConfig) -> Options {
    let mut opts = Options::default();
    opts.create_if_missing(config.create_if_missing);
    opts.set_max_open_files(config.max_open_files);
    opts
}
