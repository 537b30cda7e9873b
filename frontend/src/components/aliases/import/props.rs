//! Properties of the `AliasImportView`.
//!
//! Both values come from the hosting page; the component never looks them up
//! on its own.

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AliasImportProps {
    /// Endpoint the import form is posted to.
    pub import_url: AttrValue,

    /// Site-scope token sent along with the file.
    #[prop_or_default]
    pub site_root: AttrValue,
}
