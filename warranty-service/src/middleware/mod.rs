pub mod tenant;

pub use tenant::{
    is_excluded_path, tenant_router_middleware, Resolution, ResolutionMode, TenantContext,
    TenantRouter, ORIGINAL_HOSTNAME_HEADER, TENANT_HEADER, TENANT_HOST_HEADER,
};
