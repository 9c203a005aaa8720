use super::{ConfigurationMember, Identity};

/// Toolbar entry of a grid, owned by a configuration through `grid_configuration_id`.
#[derive(Clone, Debug, Default)]
pub struct GridToolbarItem {
    pub id: Identity,
    pub location: Option<String>,
    pub widget: Option<String>,
    pub icon: Option<String>,
    pub text: Option<String>,
    pub hint: Option<String>,
    pub on_click_action: Option<String>,
    pub visible: Option<bool>,
    pub grid_configuration_id: Option<i64>,
}

impl PartialEq for GridToolbarItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl ConfigurationMember for GridToolbarItem {
    fn grid_configuration_id(&self) -> Option<i64> {
        self.grid_configuration_id
    }

    fn set_grid_configuration_id(&mut self, id: Option<i64>) {
        self.grid_configuration_id = id;
    }
}
