// config.rs — compile-time configuration constants.
//
// Magic numbers and size limits are pinned to the DBPF/QFS wire formats
// (see dbpf::header and qfs::header); the worker-count override mirrors
// the LZ4_NBWORKERS_DEFAULT / env-var pattern this workspace started from.

/// Type id marking the CLST (compressed-entry directory) resource.
pub const CLST_TYPE_ID: u32 = 0xE86B_1EEF;

/// Group id of the synthesized CLST entry.
pub const CLST_GROUP_ID: u32 = 0xE86B_1EEF;

/// Instance id of the synthesized CLST entry.
pub const CLST_INSTANCE_ID: u32 = 0x286B_1F03;

/// QFS frame magic bytes, at offset 4 of the 9-byte header.
pub const QFS_MAGIC: [u8; 2] = [0x10, 0xFB];

/// DBPF file magic.
pub const DBPF_MAGIC: [u8; 4] = *b"DBPF";

/// Index major version written by the writer (fixed at 7 for DBPF 1.1).
pub const INDEX_MAJOR_VERSION: u32 = 7;

/// Size in bytes of the fixed DBPF header.
pub const DBPF_HEADER_SIZE: usize = 96;

/// One past the maximum representable uncompressed size (3-byte field).
pub const QFS_MAX_UNCOMPRESSED_SIZE: usize = 0x0100_0000;

/// Maximum back-reference offset (128 KiB window).
pub const QFS_MAX_OFFSET: usize = 131_072;

/// Maximum copy length representable by any control-group form.
pub const QFS_MAX_COPY_LEN: usize = 1028;

/// Environment variable overriding the default worker count.
pub const ENV_NBWORKERS: &str = "DBPF_NBWORKERS";

/// Fixed output path the CLI writes its recompressed archive to.
pub const OUTPUT_PATH: &str = "test.package";
