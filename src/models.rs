use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A sellable item as stored in the backing file.
///
/// `id` is assigned by the store and is never taken from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: u32,
}

/// Candidate for a new product. It carries no `id`; the store assigns one.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: u32,
}

impl ProductDraft {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_positive_price(self.price)?;
        require_text("thumbnail", &self.thumbnail)?;
        require_text("code", &self.code)?;
        if self.stock == 0 {
            return Err(ValidationError::NotPositive("stock"));
        }
        Ok(())
    }

    pub(crate) fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            thumbnail: self.thumbnail,
            code: self.code,
            stock: self.stock,
        }
    }
}

/// Partial update over the mutable fields of a product.
///
/// Fields left as `None` are kept as stored. Provided fields pass the same
/// checks a new product would.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<u32>,
}

impl ProductPatch {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(price) = self.price {
            require_positive_price(price)?;
        }
        if let Some(thumbnail) = &self.thumbnail {
            require_text("thumbnail", thumbnail)?;
        }
        if let Some(code) = &self.code {
            require_text("code", code)?;
        }
        if self.stock == Some(0) {
            return Err(ValidationError::NotPositive("stock"));
        }
        Ok(())
    }

    pub(crate) fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(thumbnail) = &self.thumbnail {
            product.thumbnail = thumbnail.clone();
        }
        if let Some(code) = &self.code {
            product.code = code.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn require_positive_price(price: f64) -> Result<(), ValidationError> {
    // NaN and infinities fail here as well.
    if !(price.is_finite() && price > 0.0) {
        return Err(ValidationError::NotPositive("price"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "The Car".to_owned(),
            description: "Arctic Monkeys".to_owned(),
            price: 12000.0,
            thumbnail: "ruta/tcam.jpg".to_owned(),
            code: "A007".to_owned(),
            stock: 9,
        }
    }

    #[test]
    fn complete_draft_passes() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn empty_text_fields_are_rejected() {
        for field in ["title", "description", "thumbnail", "code"] {
            let mut d = draft();
            match field {
                "title" => d.title.clear(),
                "description" => d.description.clear(),
                "thumbnail" => d.thumbnail = "   ".to_owned(),
                _ => d.code.clear(),
            }
            assert_eq!(d.validate(), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        let mut d = draft();
        d.price = 0.0;
        assert_eq!(d.validate(), Err(ValidationError::NotPositive("price")));
        d.price = -3.5;
        assert_eq!(d.validate(), Err(ValidationError::NotPositive("price")));
        d.price = f64::NAN;
        assert_eq!(d.validate(), Err(ValidationError::NotPositive("price")));

        let mut d = draft();
        d.stock = 0;
        assert_eq!(d.validate(), Err(ValidationError::NotPositive("stock")));
    }

    #[test]
    fn patch_applies_only_provided_fields() {
        let mut product = draft().into_product(1);
        let patch = ProductPatch {
            title: Some("Hot Fuss".to_owned()),
            stock: Some(4),
            ..ProductPatch::default()
        };
        patch.apply(&mut product);
        assert_eq!(product.title, "Hot Fuss");
        assert_eq!(product.stock, 4);
        assert_eq!(product.description, "Arctic Monkeys");
        assert_eq!(product.code, "A007");
        assert_eq!(product.id, 1);
    }

    #[test]
    fn empty_patch_is_valid() {
        assert_eq!(ProductPatch::default().validate(), Ok(()));
    }

    #[test]
    fn patch_rejects_bad_values() {
        let patch = ProductPatch {
            title: Some(String::new()),
            ..ProductPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::MissingField("title")));

        let patch = ProductPatch {
            price: Some(-1.0),
            ..ProductPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::NotPositive("price")));
    }
}
