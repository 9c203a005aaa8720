use super::Identity;
use chrono::{DateTime, Utc};

/// Root record: display and behaviour settings of one data grid.
#[derive(Clone, Debug, Default)]
pub struct GridConfiguration {
    pub id: Identity,
    pub grid_name: String,
    pub page_size: Option<i32>,
    pub pager_allowed_page_sizes: Option<String>,
    pub pager_show_page_size_selector: Option<bool>,
    pub pager_show_navigation_buttons: Option<bool>,
    pub allow_sorting: Option<bool>,
    pub sorting_mode: Option<String>,
    pub allow_filtering: Option<bool>,
    pub filter_row_visible: Option<bool>,
    pub header_filter_visible: Option<bool>,
    pub allow_search: Option<bool>,
    pub search_panel_visible: Option<bool>,
    pub search_panel_width: Option<i32>,
    pub search_panel_placeholder: Option<String>,
    pub allow_column_chooser: Option<bool>,
    pub column_chooser_enabled: Option<bool>,
    pub column_hiding_enabled: Option<bool>,
    pub allow_export: Option<bool>,
    pub export_enabled: Option<bool>,
    pub export_file_name: Option<String>,
    pub allow_grouping: Option<bool>,
    pub group_panel_visible: Option<bool>,
    pub allow_column_reordering: Option<bool>,
    pub allow_column_resizing: Option<bool>,
    pub selection_mode: Option<String>,
    pub selection_allow_select_all: Option<bool>,
    pub selection_show_check_boxes_mode: Option<String>,
    pub editing_mode: Option<String>,
    pub editing_allow_adding: Option<bool>,
    pub editing_allow_updating: Option<bool>,
    pub editing_allow_deleting: Option<bool>,
    pub created_date: Option<DateTime<Utc>>,
}

impl GridConfiguration {
    pub fn new(grid_name: impl Into<String>) -> Self {
        GridConfiguration {
            grid_name: grid_name.into(),
            ..Default::default()
        }
    }
}

impl PartialEq for GridConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
