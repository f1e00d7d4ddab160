//! Flat resource services.
//!
//! Each service is a thin handle borrowed from [`ApigeeClient`] that pairs a
//! fixed path template with a payload type:
//!
//! | accessor                     | path                                          |
//! |------------------------------|-----------------------------------------------|
//! | `companies()`                | `companies/{name}`                            |
//! | `company_apps()`             | `companies/{company}/apps/{app}`              |
//! | `credentials()`              | `{owner}/apps/{app}/keys/{key}`               |
//! | `developers()`               | `developers/{email or id}`                    |
//! | `developer_apps()`           | `developers/{developer}/apps/{app}`           |
//! | `key_value_maps()`           | `environments/{env}/keyvaluemaps/{map}`       |
//! | `kvm_entries()`              | `environments/{env}/keyvaluemaps/{map}/entries/{entry}` |
//! | `target_servers()`           | `environments/{env}/targetservers/{name}`     |
//! | `virtual_hosts()`            | `environments/{env}/virtualhosts/{name}`      |
//! | `organizations()`            | the organization itself                       |
//!
//! Empty identifiers are rejected with [`ApiError::Validation`] before any
//! request is sent.
//!
//! [`ApigeeClient`]: crate::clients::ApigeeClient
//! [`ApiError::Validation`]: crate::clients::ApiError::Validation

mod common;
mod company;
mod company_app;
mod credential;
mod developer;
mod developer_app;
mod kvm;
mod kvm_entry;
mod organization;
mod target_server;
mod virtual_host;

pub use common::{find_attribute, AppAction, Attribute, Properties};
pub use company::{Company, CompanyService};
pub use company_app::{CompanyApp, CompanyAppService};
pub use credential::{AppOwner, Credential, CredentialProduct, CredentialService};
pub use developer::{Developer, DeveloperService};
pub use developer_app::{DeveloperApp, DeveloperAppService};
pub use kvm::{KeyValueMap, KeyValueMapService, KvmEntry};
pub use kvm_entry::KvmEntryService;
pub use organization::{Organization, OrganizationService};
pub use target_server::{SslInfo, TargetServer, TargetServerService};
pub use virtual_host::{VirtualHost, VirtualHostService};

// Verify service handles are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompanyService<'static>>();
    assert_send_sync::<CredentialService<'static>>();
    assert_send_sync::<DeveloperService<'static>>();
    assert_send_sync::<KvmEntryService<'static>>();
    assert_send_sync::<TargetServerService<'static>>();
    assert_send_sync::<OrganizationService<'static>>();
};
