//! DTO <-> record translation. Owners travel as `{id, gridName}` out and as an id in.

use crate::domain::layout::attach_id;
use crate::domain::{ConfigurationMember, GridColumn, GridConfiguration, GridToolbarItem, Identity};
use crate::dto::{GridColumnDto, GridConfigurationDto, GridConfigurationRef, GridToolbarItemDto};
use crate::error::{AppError, AppResult};
use crate::repository::{EntityTable, WithConfiguration};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait EntityMapper: Send + Sync + 'static {
    type Entity: EntityTable;
    type Dto: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    fn to_dto(record: &<Self::Entity as EntityTable>::Record) -> Self::Dto;

    /// Build a record from a full DTO. Required fields must be present.
    fn to_entity(dto: &Self::Dto) -> AppResult<Self::Entity>;

    /// Copy the non-null fields of `dto` onto `entity`.
    fn partial_update(entity: &mut Self::Entity, dto: &Self::Dto);

    fn dto_id(dto: &Self::Dto) -> Option<i64>;
}

fn required(value: &Option<String>, property: &str) -> AppResult<String> {
    value
        .clone()
        .ok_or_else(|| AppError::Validation(format!("{} is required", property)))
}

fn owner_ref(id: Option<i64>, owner: Option<&GridConfiguration>) -> Option<GridConfigurationRef> {
    id.map(|id| GridConfigurationRef {
        id: Some(id),
        grid_name: owner.map(|o| o.grid_name.clone()),
    })
}

fn owner_id(owner: &Option<GridConfigurationRef>) -> Option<i64> {
    owner.as_ref().and_then(|o| o.id)
}

/// Attach `member` to the owner named in the DTO, if any. An absent owner leaves it as is.
fn attach_owner<M: ConfigurationMember>(member: &mut M, owner: &Option<GridConfigurationRef>) {
    if let Some(id) = owner_id(owner) {
        attach_id(member, id);
    }
}

macro_rules! patch {
    ($entity:ident, $dto:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = &$dto.$field {
                $entity.$field = Some(v.clone());
            }
        )+
    };
}

pub struct GridConfigurationMapper;

impl EntityMapper for GridConfigurationMapper {
    type Entity = GridConfiguration;
    type Dto = GridConfigurationDto;

    fn to_dto(c: &GridConfiguration) -> GridConfigurationDto {
        GridConfigurationDto {
            id: c.id.id(),
            grid_name: Some(c.grid_name.clone()),
            page_size: c.page_size,
            pager_allowed_page_sizes: c.pager_allowed_page_sizes.clone(),
            pager_show_page_size_selector: c.pager_show_page_size_selector,
            pager_show_navigation_buttons: c.pager_show_navigation_buttons,
            allow_sorting: c.allow_sorting,
            sorting_mode: c.sorting_mode.clone(),
            allow_filtering: c.allow_filtering,
            filter_row_visible: c.filter_row_visible,
            header_filter_visible: c.header_filter_visible,
            allow_search: c.allow_search,
            search_panel_visible: c.search_panel_visible,
            search_panel_width: c.search_panel_width,
            search_panel_placeholder: c.search_panel_placeholder.clone(),
            allow_column_chooser: c.allow_column_chooser,
            column_chooser_enabled: c.column_chooser_enabled,
            column_hiding_enabled: c.column_hiding_enabled,
            allow_export: c.allow_export,
            export_enabled: c.export_enabled,
            export_file_name: c.export_file_name.clone(),
            allow_grouping: c.allow_grouping,
            group_panel_visible: c.group_panel_visible,
            allow_column_reordering: c.allow_column_reordering,
            allow_column_resizing: c.allow_column_resizing,
            selection_mode: c.selection_mode.clone(),
            selection_allow_select_all: c.selection_allow_select_all,
            selection_show_check_boxes_mode: c.selection_show_check_boxes_mode.clone(),
            editing_mode: c.editing_mode.clone(),
            editing_allow_adding: c.editing_allow_adding,
            editing_allow_updating: c.editing_allow_updating,
            editing_allow_deleting: c.editing_allow_deleting,
            created_date: c.created_date,
        }
    }

    fn to_entity(d: &GridConfigurationDto) -> AppResult<GridConfiguration> {
        Ok(GridConfiguration {
            id: Identity::from(d.id),
            grid_name: required(&d.grid_name, "gridName")?,
            page_size: d.page_size,
            pager_allowed_page_sizes: d.pager_allowed_page_sizes.clone(),
            pager_show_page_size_selector: d.pager_show_page_size_selector,
            pager_show_navigation_buttons: d.pager_show_navigation_buttons,
            allow_sorting: d.allow_sorting,
            sorting_mode: d.sorting_mode.clone(),
            allow_filtering: d.allow_filtering,
            filter_row_visible: d.filter_row_visible,
            header_filter_visible: d.header_filter_visible,
            allow_search: d.allow_search,
            search_panel_visible: d.search_panel_visible,
            search_panel_width: d.search_panel_width,
            search_panel_placeholder: d.search_panel_placeholder.clone(),
            allow_column_chooser: d.allow_column_chooser,
            column_chooser_enabled: d.column_chooser_enabled,
            column_hiding_enabled: d.column_hiding_enabled,
            allow_export: d.allow_export,
            export_enabled: d.export_enabled,
            export_file_name: d.export_file_name.clone(),
            allow_grouping: d.allow_grouping,
            group_panel_visible: d.group_panel_visible,
            allow_column_reordering: d.allow_column_reordering,
            allow_column_resizing: d.allow_column_resizing,
            selection_mode: d.selection_mode.clone(),
            selection_allow_select_all: d.selection_allow_select_all,
            selection_show_check_boxes_mode: d.selection_show_check_boxes_mode.clone(),
            editing_mode: d.editing_mode.clone(),
            editing_allow_adding: d.editing_allow_adding,
            editing_allow_updating: d.editing_allow_updating,
            editing_allow_deleting: d.editing_allow_deleting,
            created_date: d.created_date,
        })
    }

    fn partial_update(c: &mut GridConfiguration, d: &GridConfigurationDto) {
        if let Some(name) = &d.grid_name {
            c.grid_name = name.clone();
        }
        patch!(
            c,
            d,
            page_size,
            pager_allowed_page_sizes,
            pager_show_page_size_selector,
            pager_show_navigation_buttons,
            allow_sorting,
            sorting_mode,
            allow_filtering,
            filter_row_visible,
            header_filter_visible,
            allow_search,
            search_panel_visible,
            search_panel_width,
            search_panel_placeholder,
            allow_column_chooser,
            column_chooser_enabled,
            column_hiding_enabled,
            allow_export,
            export_enabled,
            export_file_name,
            allow_grouping,
            group_panel_visible,
            allow_column_reordering,
            allow_column_resizing,
            selection_mode,
            selection_allow_select_all,
            selection_show_check_boxes_mode,
            editing_mode,
            editing_allow_adding,
            editing_allow_updating,
            editing_allow_deleting,
            created_date,
        );
    }

    fn dto_id(d: &GridConfigurationDto) -> Option<i64> {
        d.id
    }
}

pub struct GridColumnMapper;

impl EntityMapper for GridColumnMapper {
    type Entity = GridColumn;
    type Dto = GridColumnDto;

    fn to_dto(r: &WithConfiguration<GridColumn>) -> GridColumnDto {
        let c = &r.entity;
        GridColumnDto {
            id: c.id.id(),
            data_field: Some(c.data_field.clone()),
            caption: c.caption.clone(),
            visible: c.visible,
            data_type: c.data_type.clone(),
            format: c.format.clone(),
            width: c.width,
            allow_sorting: c.allow_sorting,
            allow_filtering: c.allow_filtering,
            grid_configuration: owner_ref(c.grid_configuration_id, r.grid_configuration.as_ref()),
        }
    }

    fn to_entity(d: &GridColumnDto) -> AppResult<GridColumn> {
        let mut column = GridColumn {
            id: Identity::from(d.id),
            data_field: required(&d.data_field, "dataField")?,
            caption: d.caption.clone(),
            visible: d.visible,
            data_type: d.data_type.clone(),
            format: d.format.clone(),
            width: d.width,
            allow_sorting: d.allow_sorting,
            allow_filtering: d.allow_filtering,
            grid_configuration_id: None,
        };
        attach_owner(&mut column, &d.grid_configuration);
        Ok(column)
    }

    fn partial_update(c: &mut GridColumn, d: &GridColumnDto) {
        if let Some(field) = &d.data_field {
            c.data_field = field.clone();
        }
        patch!(c, d, caption, visible, data_type, format, width, allow_sorting, allow_filtering);
        attach_owner(c, &d.grid_configuration);
    }

    fn dto_id(d: &GridColumnDto) -> Option<i64> {
        d.id
    }
}

pub struct GridToolbarItemMapper;

impl EntityMapper for GridToolbarItemMapper {
    type Entity = GridToolbarItem;
    type Dto = GridToolbarItemDto;

    fn to_dto(r: &WithConfiguration<GridToolbarItem>) -> GridToolbarItemDto {
        let t = &r.entity;
        GridToolbarItemDto {
            id: t.id.id(),
            location: t.location.clone(),
            widget: t.widget.clone(),
            icon: t.icon.clone(),
            text: t.text.clone(),
            hint: t.hint.clone(),
            on_click_action: t.on_click_action.clone(),
            visible: t.visible,
            grid_configuration: owner_ref(t.grid_configuration_id, r.grid_configuration.as_ref()),
        }
    }

    fn to_entity(d: &GridToolbarItemDto) -> AppResult<GridToolbarItem> {
        let mut item = GridToolbarItem {
            id: Identity::from(d.id),
            location: d.location.clone(),
            widget: d.widget.clone(),
            icon: d.icon.clone(),
            text: d.text.clone(),
            hint: d.hint.clone(),
            on_click_action: d.on_click_action.clone(),
            visible: d.visible,
            grid_configuration_id: None,
        };
        attach_owner(&mut item, &d.grid_configuration);
        Ok(item)
    }

    fn partial_update(t: &mut GridToolbarItem, d: &GridToolbarItemDto) {
        patch!(t, d, location, widget, icon, text, hint, on_click_action, visible);
        attach_owner(t, &d.grid_configuration);
    }

    fn dto_id(d: &GridToolbarItemDto) -> Option<i64> {
        d.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn owner() -> GridConfiguration {
        let mut c = GridConfiguration::new("Orders Grid");
        c.id = Identity::Saved(3);
        c
    }

    #[test]
    fn configuration_round_trip_keeps_every_column() {
        let mut c = owner();
        c.page_size = Some(25);
        c.search_panel_placeholder = Some("Search...".into());
        c.editing_allow_deleting = Some(false);
        c.created_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

        let back = GridConfigurationMapper::to_entity(&GridConfigurationMapper::to_dto(&c)).unwrap();
        assert_eq!(back.id, c.id);
        assert_eq!(back.values(), c.values());
    }

    #[test]
    fn column_dto_embeds_owner_summary_and_reduces_it_to_id() {
        let mut column = GridColumn::new("amount");
        column.id = Identity::Saved(8);
        column.width = Some(120);
        column.grid_configuration_id = Some(3);

        let dto = GridColumnMapper::to_dto(&WithConfiguration::new(column.clone(), Some(owner())));
        let summary = dto.grid_configuration.clone().unwrap();
        assert_eq!(summary.id, Some(3));
        assert_eq!(summary.grid_name.as_deref(), Some("Orders Grid"));

        let back = GridColumnMapper::to_entity(&dto).unwrap();
        assert_eq!(back.values(), column.values());
    }

    #[test]
    fn unloaded_owner_projects_to_id_only() {
        let mut item = GridToolbarItem::default();
        item.grid_configuration_id = Some(3);
        let dto = GridToolbarItemMapper::to_dto(&WithConfiguration::new(item, None));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["gridConfiguration"], serde_json::json!({ "id": 3 }));
    }

    #[test]
    fn missing_required_field_fails() {
        let err = GridColumnMapper::to_entity(&GridColumnDto::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("dataField")));
    }

    #[test]
    fn partial_update_touches_only_supplied_fields() {
        let mut c = owner();
        c.page_size = Some(20);
        c.allow_export = Some(true);
        let dto = GridConfigurationDto {
            page_size: Some(50),
            ..Default::default()
        };
        GridConfigurationMapper::partial_update(&mut c, &dto);
        assert_eq!(c.page_size, Some(50));
        assert_eq!(c.allow_export, Some(true));
        assert_eq!(c.grid_name, "Orders Grid");
    }

    #[test]
    fn to_entity_attaches_member_to_referenced_owner() {
        let dto = GridColumnDto {
            data_field: Some("amount".into()),
            grid_configuration: Some(GridConfigurationRef {
                id: Some(3),
                grid_name: Some("ignored".into()),
            }),
            ..Default::default()
        };
        let column = GridColumnMapper::to_entity(&dto).unwrap();
        assert!(column.is_member_of(&owner()));

        let orphan = GridColumnMapper::to_entity(&GridColumnDto {
            data_field: Some("amount".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(orphan.grid_configuration_id, None);
    }

    #[test]
    fn partial_update_can_move_a_member() {
        let mut item = GridToolbarItem::default();
        item.text = Some("Export".into());
        let dto = GridToolbarItemDto {
            grid_configuration: Some(GridConfigurationRef {
                id: Some(4),
                grid_name: None,
            }),
            ..Default::default()
        };
        GridToolbarItemMapper::partial_update(&mut item, &dto);
        assert_eq!(item.grid_configuration_id, Some(4));
        assert_eq!(item.text.as_deref(), Some("Export"));
    }
}
