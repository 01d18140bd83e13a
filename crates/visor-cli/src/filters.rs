//! # Filter Flags
//!
//! Shared by `query` and `export`. Plural filters repeat:
//! `--department Chocó --department Cauca`.

use clap::Args;
use visor_query::FilterCriteria;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Exact territory id (ID_ANT).
    #[arg(long)]
    pub id: Option<String>,

    /// Case-insensitive fragment of the territory name.
    #[arg(long)]
    pub name: Option<String>,

    /// Community type label; repeat for several.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Department; repeat for several.
    #[arg(long = "department", value_name = "DEPARTMENT")]
    pub departments: Vec<String>,

    /// Municipality; repeat for several.
    #[arg(long = "municipality", value_name = "MUNICIPALITY")]
    pub municipalities: Vec<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            id: self.id.clone(),
            name: self.name.clone(),
            community_types: self.types.clone(),
            departments: self.departments.clone(),
            municipalities: self.municipalities.clone(),
        }
    }
}
