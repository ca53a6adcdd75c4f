//! Static option catalogs
//!
//! Country and technology lists are derived once from bundled metadata and
//! exposed as `&'static` slices; callers filter or look up as needed.

/// A selectable country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
}

/// A selectable technology with its bundled logo asset path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Technology {
    pub name: &'static str,
    pub logo: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country { name: "Australia", code: "AU" },
    Country { name: "Bahrain", code: "BH" },
    Country { name: "Bangladesh", code: "BD" },
    Country { name: "Belgium", code: "BE" },
    Country { name: "Brazil", code: "BR" },
    Country { name: "Canada", code: "CA" },
    Country { name: "China", code: "CN" },
    Country { name: "Denmark", code: "DK" },
    Country { name: "Egypt", code: "EG" },
    Country { name: "France", code: "FR" },
    Country { name: "Germany", code: "DE" },
    Country { name: "India", code: "IN" },
    Country { name: "Indonesia", code: "ID" },
    Country { name: "Ireland", code: "IE" },
    Country { name: "Italy", code: "IT" },
    Country { name: "Japan", code: "JP" },
    Country { name: "Kenya", code: "KE" },
    Country { name: "Kuwait", code: "KW" },
    Country { name: "Malaysia", code: "MY" },
    Country { name: "Mexico", code: "MX" },
    Country { name: "Nepal", code: "NP" },
    Country { name: "Netherlands", code: "NL" },
    Country { name: "New Zealand", code: "NZ" },
    Country { name: "Nigeria", code: "NG" },
    Country { name: "Norway", code: "NO" },
    Country { name: "Oman", code: "OM" },
    Country { name: "Philippines", code: "PH" },
    Country { name: "Poland", code: "PL" },
    Country { name: "Qatar", code: "QA" },
    Country { name: "Saudi Arabia", code: "SA" },
    Country { name: "Singapore", code: "SG" },
    Country { name: "South Africa", code: "ZA" },
    Country { name: "South Korea", code: "KR" },
    Country { name: "Spain", code: "ES" },
    Country { name: "Sri Lanka", code: "LK" },
    Country { name: "Sweden", code: "SE" },
    Country { name: "Switzerland", code: "CH" },
    Country { name: "Thailand", code: "TH" },
    Country { name: "Turkey", code: "TR" },
    Country { name: "United Arab Emirates", code: "AE" },
    Country { name: "United Kingdom", code: "GB" },
    Country { name: "United States", code: "US" },
    Country { name: "Vietnam", code: "VN" },
];

pub const TECHNOLOGIES: &[Technology] = &[
    Technology { name: "AWS", logo: "/logos/aws.svg" },
    Technology { name: "Cisco", logo: "/logos/cisco.svg" },
    Technology { name: "Citrix", logo: "/logos/citrix.svg" },
    Technology { name: "CompTIA", logo: "/logos/comptia.svg" },
    Technology { name: "DevOps Institute", logo: "/logos/devops-institute.svg" },
    Technology { name: "Google Cloud", logo: "/logos/google-cloud.svg" },
    Technology { name: "IBM", logo: "/logos/ibm.svg" },
    Technology { name: "ITIL", logo: "/logos/itil.svg" },
    Technology { name: "Microsoft", logo: "/logos/microsoft.svg" },
    Technology { name: "Microsoft Azure", logo: "/logos/azure.svg" },
    Technology { name: "Oracle", logo: "/logos/oracle.svg" },
    Technology { name: "Palo Alto Networks", logo: "/logos/palo-alto.svg" },
    Technology { name: "PMI", logo: "/logos/pmi.svg" },
    Technology { name: "Red Hat", logo: "/logos/red-hat.svg" },
    Technology { name: "Salesforce", logo: "/logos/salesforce.svg" },
    Technology { name: "SAP", logo: "/logos/sap.svg" },
    Technology { name: "Scaled Agile", logo: "/logos/scaled-agile.svg" },
    Technology { name: "VMware", logo: "/logos/vmware.svg" },
];

/// Look up a country by its ISO code (case-insensitive)
pub fn country_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Look up a technology by name (case-insensitive)
pub fn technology_by_name(name: &str) -> Option<&'static Technology> {
    TECHNOLOGIES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
