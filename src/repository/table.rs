//! Table descriptors binding each domain record to its columns.

use super::row::RawRow;
use super::rowmapper;
use super::WithConfiguration;
use crate::case::to_snake_case;
use crate::domain::{GridColumn, GridConfiguration, GridToolbarItem, Identity};
use crate::error::{AppError, AppResult};
use crate::sql::{SqlType, SqlValue};

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub required: bool,
}

const fn col(name: &'static str, sql_type: SqlType) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        required: false,
    }
}

const fn required(name: &'static str, sql_type: SqlType) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        required: true,
    }
}

/// Foreign key column every member table carries.
pub const OWNER_FK: &str = "grid_configuration_id";

/// A persisted record type. `COLUMNS` excludes `id`, and `values()` is aligned with it.
pub trait EntityTable: Clone + Send + Sync + Sized + 'static {
    const TABLE: &'static str;
    /// Human readable name used in messages.
    const LABEL: &'static str;
    const COLUMNS: &'static [ColumnDef];
    /// Foreign key to `grid_configuration`, for member tables.
    const OWNER_FK: Option<&'static str> = None;
    /// `(table, fk)` pairs that reference this table and are detached on delete.
    const DEPENDENTS: &'static [(&'static str, &'static str)] = &[];

    /// What a read returns: the record, plus its owner for member tables.
    type Record: Clone + Send + Sync + 'static;

    fn identity(&self) -> Identity;
    fn set_identity(&mut self, id: Identity);
    fn values(&self) -> Vec<SqlValue>;
    fn from_row(row: &RawRow, prefix: &str) -> AppResult<Self>;
    fn into_record(self, owner: Option<GridConfiguration>) -> Self::Record;
    fn entity(record: &Self::Record) -> &Self;

    fn owner_id(&self) -> Option<i64> {
        None
    }
}

/// Where a sort property points: the id or a column index into `COLUMNS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Column(usize),
}

impl SortKey {
    pub fn column_name<T: EntityTable>(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Column(i) => T::COLUMNS[i].name,
        }
    }
}

/// Resolve a camelCase DTO property to a column of `T`.
pub fn sort_key<T: EntityTable>(property: &str) -> AppResult<SortKey> {
    let column = to_snake_case(property);
    if column == "id" {
        return Ok(SortKey::Id);
    }
    T::COLUMNS
        .iter()
        .position(|c| c.name == column)
        .map(SortKey::Column)
        .ok_or_else(|| AppError::BadRequest(format!("unknown sort property '{}' for {}", property, T::LABEL)))
}

impl EntityTable for GridConfiguration {
    const TABLE: &'static str = "grid_configuration";
    const LABEL: &'static str = "gridConfiguration";
    const COLUMNS: &'static [ColumnDef] = &[
        required("grid_name", SqlType::Varchar),
        col("page_size", SqlType::Int4),
        col("pager_allowed_page_sizes", SqlType::Varchar),
        col("pager_show_page_size_selector", SqlType::Bool),
        col("pager_show_navigation_buttons", SqlType::Bool),
        col("allow_sorting", SqlType::Bool),
        col("sorting_mode", SqlType::Varchar),
        col("allow_filtering", SqlType::Bool),
        col("filter_row_visible", SqlType::Bool),
        col("header_filter_visible", SqlType::Bool),
        col("allow_search", SqlType::Bool),
        col("search_panel_visible", SqlType::Bool),
        col("search_panel_width", SqlType::Int4),
        col("search_panel_placeholder", SqlType::Varchar),
        col("allow_column_chooser", SqlType::Bool),
        col("column_chooser_enabled", SqlType::Bool),
        col("column_hiding_enabled", SqlType::Bool),
        col("allow_export", SqlType::Bool),
        col("export_enabled", SqlType::Bool),
        col("export_file_name", SqlType::Varchar),
        col("allow_grouping", SqlType::Bool),
        col("group_panel_visible", SqlType::Bool),
        col("allow_column_reordering", SqlType::Bool),
        col("allow_column_resizing", SqlType::Bool),
        col("selection_mode", SqlType::Varchar),
        col("selection_allow_select_all", SqlType::Bool),
        col("selection_show_check_boxes_mode", SqlType::Varchar),
        col("editing_mode", SqlType::Varchar),
        col("editing_allow_adding", SqlType::Bool),
        col("editing_allow_updating", SqlType::Bool),
        col("editing_allow_deleting", SqlType::Bool),
        col("created_date", SqlType::Timestamptz),
    ];
    const DEPENDENTS: &'static [(&'static str, &'static str)] =
        &[("grid_column", OWNER_FK), ("grid_toolbar_item", OWNER_FK)];

    type Record = GridConfiguration;

    fn identity(&self) -> Identity {
        self.id
    }

    fn set_identity(&mut self, id: Identity) {
        self.id = id;
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.grid_name.clone().into(),
            self.page_size.into(),
            self.pager_allowed_page_sizes.clone().into(),
            self.pager_show_page_size_selector.into(),
            self.pager_show_navigation_buttons.into(),
            self.allow_sorting.into(),
            self.sorting_mode.clone().into(),
            self.allow_filtering.into(),
            self.filter_row_visible.into(),
            self.header_filter_visible.into(),
            self.allow_search.into(),
            self.search_panel_visible.into(),
            self.search_panel_width.into(),
            self.search_panel_placeholder.clone().into(),
            self.allow_column_chooser.into(),
            self.column_chooser_enabled.into(),
            self.column_hiding_enabled.into(),
            self.allow_export.into(),
            self.export_enabled.into(),
            self.export_file_name.clone().into(),
            self.allow_grouping.into(),
            self.group_panel_visible.into(),
            self.allow_column_reordering.into(),
            self.allow_column_resizing.into(),
            self.selection_mode.clone().into(),
            self.selection_allow_select_all.into(),
            self.selection_show_check_boxes_mode.clone().into(),
            self.editing_mode.clone().into(),
            self.editing_allow_adding.into(),
            self.editing_allow_updating.into(),
            self.editing_allow_deleting.into(),
            self.created_date.into(),
        ]
    }

    fn from_row(row: &RawRow, prefix: &str) -> AppResult<Self> {
        rowmapper::grid_configuration(row, prefix)
    }

    fn into_record(self, _owner: Option<GridConfiguration>) -> Self::Record {
        self
    }

    fn entity(record: &Self::Record) -> &Self {
        record
    }
}

impl EntityTable for GridColumn {
    const TABLE: &'static str = "grid_column";
    const LABEL: &'static str = "gridColumn";
    const COLUMNS: &'static [ColumnDef] = &[
        required("data_field", SqlType::Varchar),
        col("caption", SqlType::Varchar),
        col("visible", SqlType::Bool),
        col("data_type", SqlType::Varchar),
        col("format", SqlType::Varchar),
        col("width", SqlType::Int4),
        col("allow_sorting", SqlType::Bool),
        col("allow_filtering", SqlType::Bool),
        col(OWNER_FK, SqlType::Int8),
    ];
    const OWNER_FK: Option<&'static str> = Some(OWNER_FK);

    type Record = WithConfiguration<GridColumn>;

    fn identity(&self) -> Identity {
        self.id
    }

    fn set_identity(&mut self, id: Identity) {
        self.id = id;
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.data_field.clone().into(),
            self.caption.clone().into(),
            self.visible.into(),
            self.data_type.clone().into(),
            self.format.clone().into(),
            self.width.into(),
            self.allow_sorting.into(),
            self.allow_filtering.into(),
            self.grid_configuration_id.into(),
        ]
    }

    fn from_row(row: &RawRow, prefix: &str) -> AppResult<Self> {
        rowmapper::grid_column(row, prefix)
    }

    fn into_record(self, owner: Option<GridConfiguration>) -> Self::Record {
        WithConfiguration::new(self, owner)
    }

    fn entity(record: &Self::Record) -> &Self {
        &record.entity
    }

    fn owner_id(&self) -> Option<i64> {
        self.grid_configuration_id
    }
}

impl EntityTable for GridToolbarItem {
    const TABLE: &'static str = "grid_toolbar_item";
    const LABEL: &'static str = "gridToolbarItem";
    const COLUMNS: &'static [ColumnDef] = &[
        col("location", SqlType::Varchar),
        col("widget", SqlType::Varchar),
        col("icon", SqlType::Varchar),
        col("text", SqlType::Varchar),
        col("hint", SqlType::Varchar),
        col("on_click_action", SqlType::Varchar),
        col("visible", SqlType::Bool),
        col(OWNER_FK, SqlType::Int8),
    ];
    const OWNER_FK: Option<&'static str> = Some(OWNER_FK);

    type Record = WithConfiguration<GridToolbarItem>;

    fn identity(&self) -> Identity {
        self.id
    }

    fn set_identity(&mut self, id: Identity) {
        self.id = id;
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.location.clone().into(),
            self.widget.clone().into(),
            self.icon.clone().into(),
            self.text.clone().into(),
            self.hint.clone().into(),
            self.on_click_action.clone().into(),
            self.visible.into(),
            self.grid_configuration_id.into(),
        ]
    }

    fn from_row(row: &RawRow, prefix: &str) -> AppResult<Self> {
        rowmapper::grid_toolbar_item(row, prefix)
    }

    fn into_record(self, owner: Option<GridConfiguration>) -> Self::Record {
        WithConfiguration::new(self, owner)
    }

    fn entity(record: &Self::Record) -> &Self {
        &record.entity
    }

    fn owner_id(&self) -> Option<i64> {
        self.grid_configuration_id
    }
}
