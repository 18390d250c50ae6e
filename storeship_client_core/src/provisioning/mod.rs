//! Provisioning-profile lifecycle management
//!
//! Four operations (use-existing, list, create, revoke) over two
//! interchangeable backends: the typed store API and the legacy scripted
//! tool. The backend is chosen once at startup and injected into
//! [`ProfileService`], which owns validation, status reporting, and team
//! attribution.

pub mod appstore_backend;
pub mod backend;
pub mod certificate;
pub mod legacy_backend;
pub mod service;
pub mod types;

pub use appstore_backend::AppStoreBackend;
pub use backend::{ProvisioningBackend, select_backend};
pub use certificate::find_p12_serial_number;
pub use legacy_backend::LegacyBackend;
pub use service::ProfileService;
pub use types::{
    DistributionCertificate, ProfileClass, ProfileKind, ProvisioningProfile,
    ProvisioningProfileStoreInfo, StoreCertificateInfo,
};
