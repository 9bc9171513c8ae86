//! Client configuration interface fields.

use serde::Serialize;

use crate::auth::bootstrap::CREDENTIAL_DEFAULT_PROVIDER;
use crate::auth::facts::ServiceFacts;
use crate::emit::dependency::AWS_SDK_TYPES;
use crate::emit::writer::{Import, TypeScriptWriter};

/// A field declared on the generated client's input config interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigInterfaceField {
    pub name: &'static str,
    pub docs: &'static str,
    /// Declaration line, including the trailing semicolon
    pub declaration: String,
    pub imports: Vec<Import>,
}

impl ConfigInterfaceField {
    /// Write the documented declaration with its imports.
    pub fn write_to(&self, writer: &mut TypeScriptWriter) {
        writer.add_dependency(AWS_SDK_TYPES);
        for import in &self.imports {
            writer.add_import(import.clone());
        }
        writer.write_docs(self.docs).write(&self.declaration);
    }
}

/// Get the auth fields of the client config interface.
///
/// Only clients that need a default credential provider declare one.
pub fn config_interface_fields(facts: &ServiceFacts) -> Vec<ConfigInterfaceField> {
    if !facts.needs_credential_provider() {
        return Vec::new();
    }

    vec![ConfigInterfaceField {
        name: CREDENTIAL_DEFAULT_PROVIDER,
        docs: "Default credentials provider; Not available in browser runtime.",
        declaration: format!(
            "{}?: (input: any) => __Provider<__Credentials>;",
            CREDENTIAL_DEFAULT_PROVIDER
        ),
        imports: vec![
            Import::new("Credentials", "__Credentials", AWS_SDK_TYPES.package),
            Import::new("Provider", "__Provider", AWS_SDK_TYPES.package),
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{all_optional_fixture, signed_fixture, unsigned_fixture};

    #[test]
    fn test_signed_service_declares_provider() {
        let fixture = signed_fixture();
        let facts = ServiceFacts::collect(&fixture.build(), &fixture.service_id());
        let fields = config_interface_fields(&facts);
        assert_eq!(fields.len(), 1);

        let mut writer = TypeScriptWriter::new();
        fields[0].write_to(&mut writer);
        assert_eq!(
            writer.render(),
            "import { Credentials as __Credentials, Provider as __Provider } from \"@aws-sdk/types\";\n\
             \n\
             /**\n\
             \x20* Default credentials provider; Not available in browser runtime.\n\
             \x20*/\n\
             credentialDefaultProvider?: (input: any) => __Provider<__Credentials>;\n"
        );
    }

    #[test]
    fn test_no_field_without_auth() {
        for fixture in [unsigned_fixture(), all_optional_fixture()] {
            let facts = ServiceFacts::collect(&fixture.build(), &fixture.service_id());
            assert!(config_interface_fields(&facts).is_empty());
        }
    }
}
