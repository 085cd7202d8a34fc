//! Cities the service can fetch from upstream on a cache miss

/// A known city and its coordinates
#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const CITIES: &[City] = &[
    City {
        name: "Pristina",
        latitude: 42.6629,
        longitude: 21.1655,
    },
    City {
        name: "Prizren",
        latitude: 42.2139,
        longitude: 20.7397,
    },
    City {
        name: "Peja",
        latitude: 42.6609,
        longitude: 20.2883,
    },
    City {
        name: "Gjakova",
        latitude: 42.3803,
        longitude: 20.4309,
    },
    City {
        name: "Mitrovica",
        latitude: 42.8914,
        longitude: 20.8660,
    },
    City {
        name: "Ferizaj",
        latitude: 42.3705,
        longitude: 21.1553,
    },
];

/// Exact, case-sensitive match, the same way cache keys treat city names
pub fn lookup(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.name == name)
}

pub fn names() -> Vec<&'static str> {
    CITIES.iter().map(|c| c.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_city() {
        let city = lookup("Prizren").unwrap();
        assert_eq!(city.latitude, 42.2139);
        assert_eq!(city.longitude, 20.7397);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("prizren").is_none());
        assert!(lookup("Tirana").is_none());
    }

    #[test]
    fn test_names_in_registry_order() {
        assert_eq!(names().first(), Some(&"Pristina"));
        assert_eq!(names().len(), 6);
    }
}
