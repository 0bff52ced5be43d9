//! # Contact Directory
//!
//! The static lookup table behind every recipient list: customers, each with
//! nested vendor groups, each carrying the phones and emails that form one
//! notification's recipient set.
//!
//! The directory is loaded once at startup and never mutated. A default
//! directory is embedded in the binary; operators can point at their own TOML
//! file via config, env var, or the `--directory` flag.
//!
//! Group ids are only unique *within* their owning customer, so every group
//! lookup is scoped through a `Customer`.

use log::info;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Directory shipped with the binary, used when no override file is given.
const EMBEDDED_DIRECTORY: &str = r#"
[[customers]]
id = 1
name = "Acme Corp"

[[customers.vendor_groups]]
id = 1
name = "Vendor Group 1"
phones = ["+918825683746", "+919843314780"]
emails = ["vidhyabharathy65255@gmail.com", "secops@acme.com"]

[[customers.vendor_groups]]
id = 2
name = "Vendor Group 2"
phones = ["+447911123456"]
emails = ["team1@acme.com", "secops@acme.com"]

[[customers]]
id = 2
name = "Beta Inc"

[[customers.vendor_groups]]
id = 1
name = "Vendor Group 1"
phones = ["+14151234567", "+919876543210"]
emails = ["team1@beta.com", "secops1@beta.com"]

[[customers.vendor_groups]]
id = 2
name = "Vendor Group 2"
phones = ["+14151234567", "+919876543210"]
emails = ["team2@beta.com", "secops2@beta.com"]

[[customers.vendor_groups]]
id = 3
name = "Vendor Group 3"
phones = ["+14151234567", "+919876543210"]
emails = ["team3@beta.com", "secops3@beta.com"]
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct VendorGroup {
    pub id: u32,
    pub name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub vendor_groups: Vec<VendorGroup>,
}

impl Customer {
    /// Look up a vendor group by id, scoped to this customer.
    pub fn vendor_group(&self, group_id: u32) -> Option<&VendorGroup> {
        self.vendor_groups.iter().find(|g| g.id == group_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactDirectory {
    #[serde(default)]
    customers: Vec<Customer>,
}

#[derive(Debug)]
pub enum DirectoryError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// Two customers share an id.
    DuplicateCustomer(u32),
    /// Two groups share an id within the same customer.
    DuplicateGroup { customer: u32, group: u32 },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Io(e) => write!(f, "directory I/O error: {e}"),
            DirectoryError::Parse(e) => write!(f, "directory parse error: {e}"),
            DirectoryError::DuplicateCustomer(id) => {
                write!(f, "duplicate customer id {id}")
            }
            DirectoryError::DuplicateGroup { customer, group } => {
                write!(f, "duplicate group id {group} in customer {customer}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

impl ContactDirectory {
    /// Parse a directory from TOML and validate id uniqueness.
    pub fn from_toml(contents: &str) -> Result<Self, DirectoryError> {
        let directory: ContactDirectory =
            toml::from_str(contents).map_err(DirectoryError::Parse)?;
        directory.validate()?;
        Ok(directory)
    }

    /// The directory embedded in the binary.
    ///
    /// Panics only if the embedded data itself is invalid, which is a build
    /// defect rather than a runtime condition.
    pub fn embedded() -> Self {
        Self::from_toml(EMBEDDED_DIRECTORY).expect("embedded contact directory must be valid")
    }

    /// Load a directory from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let contents = fs::read_to_string(path).map_err(DirectoryError::Io)?;
        let directory = Self::from_toml(&contents)?;
        info!(
            "Loaded contact directory from {} ({} customers)",
            path.display(),
            directory.customers.len()
        );
        Ok(directory)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up a customer by id.
    pub fn customer(&self, customer_id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Reject duplicate customer ids and duplicate group ids per customer.
    fn validate(&self) -> Result<(), DirectoryError> {
        for (i, customer) in self.customers.iter().enumerate() {
            if self.customers[..i].iter().any(|c| c.id == customer.id) {
                return Err(DirectoryError::DuplicateCustomer(customer.id));
            }
            for (j, group) in customer.vendor_groups.iter().enumerate() {
                if customer.vendor_groups[..j].iter().any(|g| g.id == group.id) {
                    return Err(DirectoryError::DuplicateGroup {
                        customer: customer.id,
                        group: group.id,
                    });
                }
            }
        }
        Ok(())
    }
}
