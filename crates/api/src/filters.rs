//! Query filters for the custom logo design listing.

use url::form_urlencoded;

use stitchhouse_core::Price;

/// Sort orders accepted by `GET /api/custom-logo-designs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesignSort {
    Newest,
    Popular,
    PriceLow,
    PriceHigh,
}

impl DesignSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }
}

impl std::str::FromStr for DesignSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "popular" => Ok(Self::Popular),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Filters for the logo design listing. Unset or blank filters are omitted
/// from the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoDesignFilters {
    pub search: String,
    pub category: Option<String>,
    pub industry: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub sort_by: Option<DesignSort>,
}

impl LogoDesignFilters {
    /// Query parameters in wire order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push_text = |key: &'static str, value: Option<&str>| {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        };
        push_text("search", Some(self.search.as_str()));
        push_text("category", self.category.as_deref());
        push_text("industry", self.industry.as_deref());

        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.amount().normalize().to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.amount().normalize().to_string()));
        }
        if let Some(sort) = self.sort_by {
            pairs.push(("sortBy", sort.as_str().to_string()));
        }
        pairs
    }

    /// URL-encoded query string (without the leading `?`).
    #[must_use]
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_set_filters_are_sent() {
        let filters = LogoDesignFilters {
            category: Some("modern".to_string()),
            min_price: Some(Price::from_dollars(1000)),
            max_price: Some(Price::from_dollars(2500)),
            ..LogoDesignFilters::default()
        };
        assert_eq!(
            filters.query_string(),
            "category=modern&minPrice=1000&maxPrice=2500"
        );
    }

    #[test]
    fn test_blank_text_filters_omitted() {
        let filters = LogoDesignFilters {
            search: "   ".to_string(),
            industry: Some(String::new()),
            ..LogoDesignFilters::default()
        };
        assert_eq!(filters.query_string(), "");
    }

    #[test]
    fn test_search_is_encoded_and_sort_last() {
        let filters = LogoDesignFilters {
            search: "coffee & co".to_string(),
            sort_by: Some(DesignSort::PriceLow),
            ..LogoDesignFilters::default()
        };
        assert_eq!(filters.query_string(), "search=coffee+%26+co&sortBy=price-low");
    }

    #[test]
    fn test_trailing_zeros_normalized() {
        let filters = LogoDesignFilters {
            min_price: Some("1000.00".parse().unwrap_or_default()),
            ..LogoDesignFilters::default()
        };
        assert_eq!(filters.query_string(), "minPrice=1000");
    }
}
