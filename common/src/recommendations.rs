//! 病害推奨テーブル
//!
//! 学名をキーとする静的データ。コンパイル時に組み込まれ、
//! 起動後は変更されない。検索は `matcher` モジュール経由で行う。

use serde::Serialize;

/// 1つの病害と対処法
#[derive(Debug, Clone, Serialize)]
pub struct Disease {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<&'static str>,
    pub symptoms: &'static [&'static str],
    pub treatments: &'static [&'static str],
}

/// 1種の植物に対する推奨情報
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationEntry {
    pub scientific_name: &'static str,
    pub common_name: &'static str,
    pub diseases: &'static [Disease],
    pub general_practices: &'static [&'static str],
}

/// 登録済みの推奨テーブル（登録順がタイブレークの順になる）
pub static DISEASE_RECOMMENDATIONS: &[RecommendationEntry] = &[
    RecommendationEntry {
        scientific_name: "Cucumis sativus",
        common_name: "Cucumber",
        diseases: &[
            Disease {
                name: "Downy mildew",
                cause: None,
                vector: None,
                symptoms: &[
                    "Yellow patches on leaves",
                    "Leaf necrosis",
                    "Appears especially under high humidity",
                ],
                treatments: &[
                    "Improve ventilation",
                    "Reduce foliage humidity",
                    "Apply suitable fungicides when needed (follow local recommendations)",
                ],
            },
            Disease {
                name: "Gummy stem blight",
                cause: Some("Didymella bryoniae"),
                vector: None,
                symptoms: &[
                    "Gummy sap exudate on the stem",
                    "Plant weakening",
                    "Plant collapse",
                ],
                treatments: &[
                    "Remove infected crop debris",
                    "Rotate crops",
                    "Use healthy seed",
                    "Control with fungicides where viable",
                    "Debris management is key since the fungus survives on crop residue",
                ],
            },
            Disease {
                name: "Viral diseases",
                cause: None,
                vector: None,
                symptoms: &[
                    "Symptoms vary with the specific virus",
                    "Depends on the region and local vectors",
                ],
                treatments: &[
                    "Use resistant varieties when available",
                    "Control insect vectors",
                    "Remove infected plants",
                ],
            },
        ],
        general_practices: &[
            "Keep the field clean",
            "Use more resistant varieties when available",
        ],
    },
    RecommendationEntry {
        scientific_name: "Dioscorea alata",
        common_name: "Water yam",
        diseases: &[
            Disease {
                name: "Anthracnose",
                cause: Some("Colletotrichum alatae / gloeosporioides"),
                vector: None,
                symptoms: &[
                    "Leaf necrosis",
                    "Black or brown spots",
                    "Shoot dieback",
                ],
                treatments: &[
                    "Use resistant varieties (one of the best strategies)",
                    "Fungicides such as Bordeaux mixture (in seed production)",
                    "Remove and burn infected debris to reduce inoculum",
                    "Rotate crops",
                ],
            },
            Disease {
                name: "Viral diseases",
                cause: None,
                vector: None,
                symptoms: &[
                    "Leaf mosaic",
                    "Deformation",
                    "Reduced yield",
                    "Vein banding",
                    "Weakening",
                ],
                treatments: &[
                    "Use healthy planting material",
                    "Remove severely infected plants",
                    "Control virus vectors",
                ],
            },
            Disease {
                name: "Brown leaf spot",
                cause: Some("Mycosphaerella henningsii"),
                vector: None,
                symptoms: &["Brown spots on leaves"],
                treatments: &["Debris management", "Suitable fungicides"],
            },
            Disease {
                name: "Nematodes",
                cause: Some("Scutellonema bradys"),
                vector: None,
                symptoms: &["Dry rot in tubers", "Internal tuber damage"],
                treatments: &[
                    "Avoid wounding tubers at harvest",
                    "Use sound storage practices",
                    "Nematicide treatments where permitted in your region",
                ],
            },
            Disease {
                name: "Tuber rots",
                cause: Some("Fusarium, Penicillium, Rosellinia"),
                vector: None,
                symptoms: &[
                    "Tuber rot",
                    "Cracking",
                    "Necrotic areas",
                    "Internal reddening or dry rot depending on the pathogen",
                ],
                treatments: &[
                    "Select and sanitize planting material",
                    "Use disease-free seed yam",
                    "Avoid propagating infected tubers",
                    "Proper storage practices",
                ],
            },
        ],
        general_practices: &[
            "Crop rotation: avoid planting yam in the same spot without rotating",
            "Select resistant cultivars",
            "Manage crop debris properly",
        ],
    },
    RecommendationEntry {
        scientific_name: "Manihot esculenta",
        common_name: "Cassava",
        diseases: &[
            Disease {
                name: "Cassava bacterial blight",
                cause: Some("Xanthomonas axonopodis pv. manihotis"),
                vector: None,
                symptoms: &[
                    "Wilting",
                    "Vascular necrosis",
                    "Dieback",
                    "Leaf spots",
                    "Necrosis",
                ],
                treatments: &[
                    "Use certified healthy planting material (clean cuttings)",
                    "Prune or remove infected tissue",
                    "Rotate crops",
                    "Sanitation: remove infected debris",
                ],
            },
            Disease {
                name: "Cassava mosaic disease",
                cause: Some("African cassava mosaic virus (ACMV) and/or Indian cassava mosaic virus (ICMV)"),
                vector: Some("Whitefly Bemisia tabaci"),
                symptoms: &[
                    "Mosaic pattern on leaves",
                    "Chlorosis",
                    "Deformation",
                    "Stunted growth",
                ],
                treatments: &[
                    "Use resistant or tolerant varieties",
                    "Control the vector (whitefly Bemisia tabaci)",
                    "Remove heavily infected plants to reduce the inoculum source",
                    "Good agronomy: keep plantations clean",
                    "Avoid high densities that favour vectors",
                ],
            },
            Disease {
                name: "Brown leaf spot",
                cause: Some("Mycosphaerella henningsii"),
                vector: None,
                symptoms: &[
                    "Brown dots on leaves",
                    "Dark margins",
                    "Premature leaf fall",
                ],
                treatments: &[
                    "Manage infected leaf debris (remove fallen leaves)",
                    "Rotate crops to reduce inoculum pressure",
                    "Possible fungicide use (per local regulations) for severe infection",
                ],
            },
        ],
        general_practices: &[
            "Use certified planting material",
            "Keep plantations clean",
            "Rotate crops",
        ],
    },
    RecommendationEntry {
        scientific_name: "Solanum melongena",
        common_name: "Eggplant",
        diseases: &[
            Disease {
                name: "Bacterial wilt",
                cause: Some("Ralstonia solanacearum"),
                vector: None,
                symptoms: &[
                    "Wilting",
                    "Yellowing leaves",
                    "Leaf drop",
                    "Dark vascular tissue when the stem is cut",
                ],
                treatments: &[
                    "Select hybrids or varieties resistant to bacterial wilt",
                    "Crop rotation: no eggplant or other solanaceae in the same soil for several years",
                    "Field sanitation: remove infected plants",
                    "Clean debris and disinfect tools",
                ],
            },
            Disease {
                name: "Fusarium wilt",
                cause: Some("Fusarium oxysporum f. sp. melongenae"),
                vector: None,
                symptoms: &[
                    "Wilting",
                    "Yellowing leaves",
                    "Dark vascular tissue when the stem is cut",
                ],
                treatments: &[
                    "Resistant varieties",
                    "Rotate crops",
                    "Improve drainage (soil must not be too compacted)",
                    "Field sanitation",
                ],
            },
            Disease {
                name: "Verticillium wilt",
                cause: Some("Verticillium dahliae"),
                vector: None,
                symptoms: &[
                    "Wilting",
                    "Yellowing leaves",
                    "Dark vascular tissue when the stem is cut",
                ],
                treatments: &[
                    "Resistant varieties",
                    "Rotate crops",
                    "Improve drainage",
                    "Field sanitation",
                ],
            },
            Disease {
                name: "Cercospora leaf spot",
                cause: Some("Cercospora melongenae"),
                vector: None,
                symptoms: &["Circular or irregular lesions on leaves"],
                treatments: &[
                    "Targeted fungicides (respect local regulations)",
                    "Field sanitation",
                    "Rotate crops",
                ],
            },
            Disease {
                name: "Phomopsis blight",
                cause: Some("Phomopsis vexans"),
                vector: None,
                symptoms: &[
                    "Lesions on leaves and fruit",
                    "Black pycnidia on infected tissue",
                ],
                treatments: &["Fungicides", "Field sanitation", "Rotate crops"],
            },
        ],
        general_practices: &[
            "Crop rotation (avoid solanaceae in the same soil)",
            "Field sanitation",
            "Improve drainage",
            "Biological control (depending on region and local availability)",
        ],
    },
    RecommendationEntry {
        scientific_name: "Zea mays",
        common_name: "Maize",
        diseases: &[
            Disease {
                name: "Gray leaf spot",
                cause: Some("Cercospora zeae-maydis"),
                vector: None,
                symptoms: &[
                    "Rectangular necrotic lesions",
                    "Parallel to the veins",
                    "Browning",
                ],
                treatments: &[
                    "Use resistant hybrids",
                    "Rotate crops",
                    "Debris management: remove infected plant residue",
                    "Foliar fungicides when appropriate",
                ],
            },
            Disease {
                name: "Southern corn leaf blight",
                cause: Some("Bipolaris maydis (Cochliobolus heterostrophus)"),
                vector: None,
                symptoms: &["Leaf spots", "Necrosis", "Varies with the race"],
                treatments: &[
                    "Resistant varieties",
                    "Rotate crops",
                    "Debris management",
                    "Foliar fungicides",
                ],
            },
            Disease {
                name: "Common rust",
                cause: Some("Puccinia sorghi"),
                vector: None,
                symptoms: &[
                    "Reddish rust pustules on leaves",
                    "Under favourable conditions",
                ],
                treatments: &[
                    "Use rust-resistant hybrids",
                    "Foliar fungicides",
                    "Regular monitoring",
                ],
            },
            Disease {
                name: "Corn smut",
                cause: Some("Ustilago maydis"),
                vector: None,
                symptoms: &[
                    "Galls on ears, stalks and leaves",
                    "Galls contain dark spores",
                ],
                treatments: &[
                    "Resistant varieties",
                    "Rotate crops",
                    "Remove and destroy galls before they release spores",
                ],
            },
            Disease {
                name: "Stalk rots",
                cause: Some("Fusarium spp., Gibberella, etc."),
                vector: None,
                symptoms: &[
                    "Weakened stalks",
                    "Internal rot",
                    "Lodging plants",
                ],
                treatments: &[
                    "Resistant varieties",
                    "Optimize planting density",
                    "Ventilation between plants",
                    "Balanced fertilization (avoid nitrogen excess)",
                    "Debris management",
                ],
            },
            Disease {
                name: "Tar spot",
                cause: Some("Phyllachora maydis"),
                vector: None,
                symptoms: &["Circular black dots (stromata) on leaves"],
                treatments: &[
                    "Resistant varieties",
                    "Foliar fungicides",
                    "Debris management",
                ],
            },
        ],
        general_practices: &[
            "Rotate crops",
            "Debris management: remove infected plant residue",
            "Optimize planting density and ventilation",
            "Balanced fertilization (avoiding nitrogen excess can reduce some diseases)",
            "Inspection and monitoring: regular scouting for early symptoms",
            "Biological management: biocontrol agents can be used in some cases",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_five_species() {
        assert_eq!(DISEASE_RECOMMENDATIONS.len(), 5);
    }

    #[test]
    fn test_keys_are_genus_species() {
        for entry in DISEASE_RECOMMENDATIONS {
            let tokens: Vec<&str> = entry.scientific_name.split_whitespace().collect();
            assert_eq!(tokens.len(), 2, "key must be genus + species: {}", entry.scientific_name);
        }
    }

    #[test]
    fn test_every_disease_has_symptoms_and_treatments() {
        for entry in DISEASE_RECOMMENDATIONS {
            assert!(!entry.diseases.is_empty());
            for disease in entry.diseases {
                assert!(!disease.symptoms.is_empty(), "{}: {}", entry.scientific_name, disease.name);
                assert!(!disease.treatments.is_empty(), "{}: {}", entry.scientific_name, disease.name);
            }
        }
    }

    #[test]
    fn test_serializes_to_json() {
        let entry = &DISEASE_RECOMMENDATIONS[1];
        let json = serde_json::to_string(entry).unwrap();
        assert!(json.contains("\"scientific_name\":\"Dioscorea alata\""));
        assert!(json.contains("Anthracnose"));
    }
}
