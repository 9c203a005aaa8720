//! Wire shapes of the grid resources. JSON keys are camelCase; every field is optional on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridConfigurationDto {
    pub id: Option<i64>,
    pub grid_name: Option<String>,
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

/// Owner summary embedded in member resources. Only `id` is read back on input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridConfigurationRef {
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridColumnDto {
    pub id: Option<i64>,
    pub data_field: Option<String>,
    pub caption: Option<String>,
    pub visible: Option<bool>,
    pub data_type: Option<String>,
    pub format: Option<String>,
    pub width: Option<i32>,
    pub allow_sorting: Option<bool>,
    pub allow_filtering: Option<bool>,
    pub grid_configuration: Option<GridConfigurationRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridToolbarItemDto {
    pub id: Option<i64>,
    pub location: Option<String>,
    pub widget: Option<String>,
    pub icon: Option<String>,
    pub text: Option<String>,
    pub hint: Option<String>,
    pub on_click_action: Option<String>,
    pub visible: Option<bool>,
    pub grid_configuration: Option<GridConfigurationRef>,
}

/// A configuration with its members, as served by `/api/grid-configurations/{id}/layout`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridLayoutDto {
    #[serde(flatten)]
    pub configuration: GridConfigurationDto,
    pub columns: Vec<GridColumnDto>,
    pub toolbar_items: Vec<GridToolbarItemDto>,
}
