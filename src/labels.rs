//! Class table baked in at model export time. The entries mix diagnosis,
//! disease stage, severity, demographics and geography; the service
//! treats them as an opaque closed set and only ever indexes into it.

pub const LABELS: &[&str] = &[
    "2019-nCoV-Negative",
    "2019-nCoV-Positive",
    "Severe",
    "Asymptomatic",
    "Mild",
    "Critical",
    "Absorption stage",
    "Consolidation stage",
    "Early stage",
    "Dissipation stage",
    "Moderate",
    "Pregnant",
    "Male",
    "Female",
    "75.0 y/o",
    "76.0 y/o",
    "70.0 y/o",
    "73.0 y/o",
    "44.0 y/o",
    "65.0 y/o",
    "37.0 y/o",
    "50.0 y/o",
    "1.0 y/o",
    "33.0 y/o",
    "21.0 y/o",
    "69.0 y/o",
    "57.0 y/o",
    "64.0 y/o",
    "60.0 y/o",
    "72.0 y/o",
    "63.0 y/o",
    "36.0 y/o",
    "34.0 y/o",
    "48.0 y/o",
    "45.0 y/o",
    "39.0 y/o",
    "66.0 y/o",
    "41.0 y/o",
    "40.0 y/o",
    "32.0 y/o",
    "49.0 y/o",
    "23.0 y/o",
    "71.0 y/o",
    "46.0 y/o",
    "27.0 y/o",
    "28.0 y/o",
    "31.0 y/o",
    "59.0 y/o",
    "62.0 y/o",
    "55.0 y/o",
    "\"Diamond Princess\" Cruise Ship",
    "Beijing, China",
    "Changsha, China",
    "China (Unspecified Region)",
    "Guangdon, China",
    "Hainan, China",
    "Hubei, China",
    "Hunan, China",
    "Jingmen, Hubei, China",
    "Qingdao, China",
    "Shanghai, China",
    "Shenzhen, China",
    "Sichuan, China",
    "Wuhan, China",
    "Xi'an, China",
    "Zhejiang, China",
];
