//! ItemGunplaBox row view: a purchasable kit box and its contents.

use serde_json::Value;

use crate::error::{DataError, Result};
use crate::registry::{tables, Row};
use crate::views::equip::EquipParameter;
use crate::views::part::PartParameter;
use crate::views::text::TextRow;

#[derive(Clone, Copy, Debug)]
pub struct GunplaBox<'r>(Row<'r>);

impl<'r> GunplaBox<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn row(&self) -> Row<'r> {
        self.0
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    /// The suit id the box builds into.
    pub fn item_id(&self) -> Result<&'r str> {
        self.0.str_field("_ItemId")
    }

    pub fn box_art_id(&self) -> Result<&'r str> {
        self.0.str_field("_BoxArtId")
    }

    /// Kit grade, the first two characters of the box art id (`HG`, `MG`,
    /// `SD`).
    pub fn grade(&self) -> Result<&'r str> {
        let art = self.box_art_id()?;
        art.get(..2).ok_or_else(|| DataError::FieldShape {
            table: self.0.table_name().to_string(),
            id: self.0.id().to_string(),
            field: "_BoxArtId",
            expected: "an id carrying a two-character grade prefix",
        })
    }

    pub fn series_name(&self) -> Result<&'r str> {
        self.0.str_field("_GundamSeriesName")
    }

    /// Localized series title, when the export carries it.
    pub fn series_name_localized(&self) -> Result<Option<TextRow<'r>>> {
        Ok(self
            .0
            .reference_opt("_GundamSeriesName", tables::TEXT_SERIES_NAME)?
            .map(TextRow::from_row))
    }

    /// Kit display name: the preset character name of the suit it builds.
    pub fn name_localized(&self) -> Result<TextRow<'r>> {
        let key = self.item_id()?;
        let row = self
            .0
            .registry()
            .table(tables::TEXT_PRESET_CHARACTER_NAME)?
            .by_id(key)?;
        Ok(TextRow::from_row(row))
    }

    /// Shop listing for the box, when one exists.
    pub fn shop_listing(&self) -> Result<Option<ShopListing<'r>>> {
        Ok(self
            .0
            .reference_opt("_ItemId", tables::SHOP_ITEM)?
            .map(ShopListing::from_row))
    }

    /// Raw content ids of the box.
    pub fn item_ids(&self) -> Result<Vec<&'r str>> {
        self.0
            .list_field("_ItemArray")?
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| DataError::FieldShape {
                    table: self.0.table_name().to_string(),
                    id: self.0.id().to_string(),
                    field: "_ItemArray",
                    expected: "a list of string ids",
                })
            })
            .collect()
    }

    /// Contents that are body parts. The item array mixes part and
    /// equipment ids, so entries absent from PartsParameter are dropped.
    pub fn parts(&self) -> Result<Vec<PartParameter<'r>>> {
        Ok(self
            .0
            .reference_list_opt("_ItemArray", tables::PARTS_PARAMETER)?
            .into_iter()
            .map(PartParameter::from_row)
            .collect())
    }

    /// Contents that are equipment, same dropping rule as [`GunplaBox::parts`].
    pub fn equips(&self) -> Result<Vec<EquipParameter<'r>>> {
        Ok(self
            .0
            .reference_list_opt("_ItemArray", tables::EQUIP_PARAMETER)?
            .into_iter()
            .map(EquipParameter::from_row)
            .collect())
    }
}

/// ShopItem row view: price data for a purchasable item.
#[derive(Clone, Copy, Debug)]
pub struct ShopListing<'r>(Row<'r>);

impl<'r> ShopListing<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    pub fn price(&self) -> Result<u64> {
        self.0
            .field("_Price")?
            .as_u64()
            .ok_or_else(|| DataError::FieldShape {
                table: self.0.table_name().to_string(),
                id: self.0.id().to_string(),
                field: "_Price",
                expected: "an unsigned integer",
            })
    }
}
