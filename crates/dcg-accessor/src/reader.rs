use dcg_types::{PropertyTable, RuntimeError, Value};

/// Reads one declared property out of an interface's property table.
///
/// A reader is pure configuration: the interface it belongs to and the
/// property it reads. It holds no reference to any data, so one reader
/// serves every entry its [`AccessorType`](crate::AccessorType) wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyReader {
    interface_name: String,
    property: String,
}

impl PropertyReader {
    pub(crate) fn new(interface_name: &str, property: &str) -> Self {
        Self {
            interface_name: interface_name.to_string(),
            property: property.to_string(),
        }
    }

    /// The interface this reader is bound to.
    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    /// The property this reader reads.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Look the property up in `table`.
    ///
    /// Fails with [`RuntimeError::MissingProperty`] if the table has no
    /// value for it.
    pub fn read<'a>(&self, table: &'a PropertyTable) -> Result<&'a Value, RuntimeError> {
        table
            .get(&self.property)
            .ok_or_else(|| RuntimeError::MissingProperty {
                interface_name: self.interface_name.clone(),
                property: self.property.clone(),
            })
    }
}
