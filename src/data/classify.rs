use super::model::{Category, Region};

// ---------------------------------------------------------------------------
// Ordered rule lists: first matching predicate wins
// ---------------------------------------------------------------------------

/// How a rule tests its input.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Input equals one of the names.
    OneOf(&'static [&'static str]),
    /// Input contains one of the keywords as a substring.
    ContainsAny(&'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Predicate::OneOf(names) => names.contains(&input),
            Predicate::ContainsAny(keywords) => keywords.iter().any(|k| input.contains(k)),
        }
    }
}

/// A `(predicate, label)` pair.  Rules are evaluated top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct Rule<L> {
    pub predicate: Predicate,
    pub label: L,
}

/// City → Region.  Exact, case-sensitive comparison on the trimmed city name.
pub const REGION_RULES: &[Rule<Region>] = &[
    Rule {
        predicate: Predicate::OneOf(&["New York City", "Boston"]),
        label: Region::East,
    },
    Rule {
        predicate: Predicate::OneOf(&["San Francisco", "Los Angeles"]),
        label: Region::West,
    },
    Rule {
        predicate: Predicate::OneOf(&["Dallas", "Atlanta"]),
        label: Region::South,
    },
    Rule {
        predicate: Predicate::OneOf(&["Seattle", "Portland"]),
        label: Region::North,
    },
];

/// Product → Category.  Case-sensitive substring containment.
pub const CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        predicate: Predicate::ContainsAny(&["Laptop", "Monitor", "PC"]),
        label: Category::Electronics,
    },
    Rule {
        predicate: Predicate::ContainsAny(&["iPhone", "Phone"]),
        label: Category::Mobile,
    },
    Rule {
        predicate: Predicate::ContainsAny(&["Cable", "Headphones", "Wired", "Charger", "Machine"]),
        label: Category::Accessories,
    },
];

/// Return the label of the first rule matching `input`, or `fallback`.
pub fn classify<L: Copy>(rules: &[Rule<L>], input: &str, fallback: L) -> L {
    rules
        .iter()
        .find(|rule| rule.predicate.matches(input))
        .map(|rule| rule.label)
        .unwrap_or(fallback)
}

/// Map a city name to its region; unknown cities fall back to `Central`.
pub fn region_for_city(city: &str) -> Region {
    classify(REGION_RULES, city, Region::Central)
}

/// Map a product name to its category; unmatched products are `Other`.
pub fn category_for_product(product: &str) -> Category {
    classify(CATEGORY_RULES, product, Category::Other)
}

/// Second comma-separated token of an address, trimmed.
/// `None` when the address has no comma.
pub fn city_from_address(address: &str) -> Option<&str> {
    address.split(',').nth(1).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_rule_order() {
        assert_eq!(category_for_product("USB-C Charging Cable"), Category::Accessories);
        assert_eq!(category_for_product("27in 4K Monitor"), Category::Electronics);
        assert_eq!(category_for_product("iPhone"), Category::Mobile);
        assert_eq!(category_for_product("Google Phone"), Category::Mobile);
        assert_eq!(category_for_product("LG Washing Machine"), Category::Accessories);
        assert_eq!(category_for_product("AA Batteries (4-pack)"), Category::Other);
        // Lowercase "phones" inside "Headphones" is not the "Phone" keyword.
        assert_eq!(category_for_product("Bose SoundSport Headphones"), Category::Accessories);
        // Electronics wins over everything listed after it.
        assert_eq!(category_for_product("Macbook Pro Laptop Charger"), Category::Electronics);
    }

    #[test]
    fn category_match_is_case_sensitive() {
        assert_eq!(category_for_product("usb-c charging cable"), Category::Other);
        assert_eq!(category_for_product("pc"), Category::Other);
    }

    #[test]
    fn regions_use_exact_city_names() {
        assert_eq!(region_for_city("Boston"), Region::East);
        assert_eq!(region_for_city("New York City"), Region::East);
        assert_eq!(region_for_city("Los Angeles"), Region::West);
        assert_eq!(region_for_city("Atlanta"), Region::South);
        assert_eq!(region_for_city("Portland"), Region::North);
        assert_eq!(region_for_city("Austin"), Region::Central);
        assert_eq!(region_for_city("boston"), Region::Central);
        assert_eq!(region_for_city(""), Region::Central);
    }

    #[test]
    fn city_is_second_address_token() {
        let addr = "917 1st St, Boston, MA 02215";
        let city = city_from_address(addr).unwrap();
        assert_eq!(city, "Boston");
        assert_eq!(region_for_city(city), Region::East);

        let austin = city_from_address("44 Pine St, Austin, TX 73301").unwrap();
        assert_eq!(region_for_city(austin), Region::Central);

        assert_eq!(city_from_address("no comma here"), None);
    }

    #[test]
    fn every_label_is_in_its_set() {
        for product in ["ThinkPad Laptop", "Vareebadd Phone", "Flatscreen TV", ""] {
            assert!(Category::ALL.contains(&category_for_product(product)));
        }
        for city in ["Seattle", "Dallas", "San Francisco", "Springfield"] {
            assert!(Region::ALL.contains(&region_for_city(city)));
        }
    }
}
