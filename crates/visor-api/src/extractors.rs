//! # Request Extractors
//!
//! Every filtering endpoint takes the same query string. Plural filters are
//! repeated keys (`?department=Chocó&department=Cauca`), which is why the
//! `axum-extra` query extractor is used instead of axum's.

use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;
use utoipa::IntoParams;
use visor_core::BaseMapStyle;
use visor_query::FilterCriteria;

use crate::error::AppError;

/// Filter and base-map parameters shared by the viewer endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewerQuery {
    /// Exact territory id (`ID_ANT`).
    #[serde(default)]
    pub id: Option<String>,
    /// Case-insensitive fragment of the territory name.
    #[serde(default)]
    pub name: Option<String>,
    /// Community type label; repeat for several.
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    /// Department; repeat for several.
    #[serde(default, rename = "department")]
    pub departments: Vec<String>,
    /// Municipality; repeat for several.
    #[serde(default, rename = "municipality")]
    pub municipalities: Vec<String>,
    /// Base-map slug (`osm`, `positron`, `dark-matter`, `satellite`,
    /// `gray-canvas`, `topo`).
    #[serde(default)]
    pub basemap: Option<String>,
}

impl ViewerQuery {
    /// The filter criteria carried by this query.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            id: self.id.clone(),
            name: self.name.clone(),
            community_types: self.types.clone(),
            departments: self.departments.clone(),
            municipalities: self.municipalities.clone(),
        }
    }

    /// The requested base map, or `default` when none was given.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for an unknown slug.
    pub fn basemap_or(&self, default: BaseMapStyle) -> Result<BaseMapStyle, AppError> {
        match self.basemap.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(slug) => Ok(slug.parse()?),
        }
    }

    /// Re-encode the query, with `basemap` set to `style`, for links from
    /// the viewer page to the map and export endpoints.
    pub fn to_query_string(&self, style: BaseMapStyle) -> String {
        let mut out = url::form_urlencoded::Serializer::new(String::new());
        let non_blank = |v: &&String| !v.trim().is_empty();
        if let Some(id) = self.id.as_ref().filter(non_blank) {
            out.append_pair("id", id);
        }
        if let Some(name) = self.name.as_ref().filter(non_blank) {
            out.append_pair("name", name);
        }
        for value in self.types.iter().filter(non_blank) {
            out.append_pair("type", value);
        }
        for value in self.departments.iter().filter(non_blank) {
            out.append_pair("department", value);
        }
        for value in self.municipalities.iter().filter(non_blank) {
            out.append_pair("municipality", value);
        }
        out.append_pair("basemap", style.as_str());
        out.finish()
    }
}

/// Unwrap a query extraction, mapping rejections to [`AppError::BadRequest`].
pub fn extract_query(query: Result<Query<ViewerQuery>, QueryRejection>) -> Result<ViewerQuery, AppError> {
    let Query(query) = query?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_carry_every_filter() {
        let q = ViewerQuery {
            id: Some("12".into()),
            types: vec!["Consejo Comunitario".into()],
            departments: vec!["Chocó".into(), "Cauca".into()],
            ..Default::default()
        };
        let c = q.criteria();
        assert_eq!(c.id.as_deref(), Some("12"));
        assert_eq!(c.community_types, vec!["Consejo Comunitario"]);
        assert_eq!(c.departments.len(), 2);
    }

    #[test]
    fn blank_basemap_uses_default() {
        let q = ViewerQuery {
            basemap: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(
            q.basemap_or(BaseMapStyle::EsriImagery).unwrap(),
            BaseMapStyle::EsriImagery
        );
    }

    #[test]
    fn unknown_basemap_is_validation_error() {
        let q = ViewerQuery {
            basemap: Some("watercolor".into()),
            ..Default::default()
        };
        assert!(matches!(
            q.basemap_or(BaseMapStyle::default()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn query_string_repeats_plural_keys() {
        let q = ViewerQuery {
            name: Some("".into()),
            departments: vec!["Chocó".into(), "Valle del Cauca".into()],
            ..Default::default()
        };
        assert_eq!(
            q.to_query_string(BaseMapStyle::OpenTopoMap),
            "department=Choc%C3%B3&department=Valle+del+Cauca&basemap=topo"
        );
    }
}
