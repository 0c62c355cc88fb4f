pub use super::url::Entity as Url;
