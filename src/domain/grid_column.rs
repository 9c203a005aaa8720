use super::{ConfigurationMember, Identity};

/// One column of a grid, owned by a configuration through `grid_configuration_id`.
#[derive(Clone, Debug, Default)]
pub struct GridColumn {
    pub id: Identity,
    pub data_field: String,
    pub caption: Option<String>,
    pub visible: Option<bool>,
    pub data_type: Option<String>,
    pub format: Option<String>,
    pub width: Option<i32>,
    pub allow_sorting: Option<bool>,
    pub allow_filtering: Option<bool>,
    pub grid_configuration_id: Option<i64>,
}

impl GridColumn {
    pub fn new(data_field: impl Into<String>) -> Self {
        GridColumn {
            data_field: data_field.into(),
            ..Default::default()
        }
    }
}

impl PartialEq for GridColumn {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl ConfigurationMember for GridColumn {
    fn grid_configuration_id(&self) -> Option<i64> {
        self.grid_configuration_id
    }

    fn set_grid_configuration_id(&mut self, id: Option<i64>) {
        self.grid_configuration_id = id;
    }
}
