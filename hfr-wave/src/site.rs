use serde::{Deserialize, Serialize};

/// A radar site that has wave data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
}

/// Entry of the site dropdown: `{label, value}` as the page expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOption {
    pub label: String,
    pub value: i64,
}

impl From<&Site> for SiteOption {
    fn from(site: &Site) -> Self {
        SiteOption {
            label: site.name.clone(),
            value: site.id,
        }
    }
}

impl Site {
    /// Dropdown options for a list of sites, keeping their order.
    pub fn options(sites: &[Site]) -> Vec<SiteOption> {
        sites.iter().map(SiteOption::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_options() {
        let sites = vec![
            Site { id: 28, name: "SEAB".to_string() },
            Site { id: 31, name: "BRAD".to_string() },
        ];
        let options = Site::options(&sites);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], SiteOption { label: "SEAB".to_string(), value: 28 });
        assert_eq!(options[1].value, 31);
    }
}
