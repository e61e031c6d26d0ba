/// Product-creation endpoint, exposed by this gateway and mirrored on the
/// backend it forwards to.
pub const PRODUCT_CREATE_PATH: &str = "/api/admin/produk2";

/// Longest raw-body snippet surfaced when the backend returns non-JSON.
pub const RAW_SNIPPET_MAX_CHARS: usize = 512;
