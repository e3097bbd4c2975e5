use crate::StorageError;
use crate::loaders::{CollegeClubEntity, CollegeDatabaseEntity};
use log::info;
use rand::Rng;
use std::fs;
use std::path::Path;
use unifut_core::utils::IntegerUtils;

const COLLEGE1_CLUBS: [(&str, [&str; 12]); 8] = [
    (
        "Amazônica",
        [
            "Amazonas FC", "Manaus", "Nacional-AM", "São Raimundo-RR", "Rio Branco-AC", "Humaitá",
            "Porto Velho", "Genus", "Trem", "Santos-AP", "Águia de Marabá", "Tuna Luso",
        ],
    ),
    (
        "Nordeste Atlântico",
        [
            "Sampaio Corrêa", "Moto Club", "River-PI", "Altos", "América-RN", "ABC", "Potiguar",
            "Botafogo-PB", "Treze", "Campinense", "Sousa", "Ferroviário-CE",
        ],
    ),
    (
        "Nordeste Sul",
        [
            "Náutico", "Santa Cruz", "Retrô", "Petrolina", "CRB", "CSA", "ASA", "CSE", "Confiança",
            "Sergipe", "Itabaiana", "Juazeirense",
        ],
    ),
    (
        "Centro-Oeste",
        [
            "Vila Nova", "Aparecidense", "Anápolis", "Goianésia", "Brasiliense", "Gama",
            "Real Brasília", "Ceilândia", "Luverdense", "Mixto", "União Rondonópolis", "Operário-VG",
        ],
    ),
    (
        "Sudeste Norte",
        [
            "Tombense", "Athletic Club", "Caldense", "Villa Nova-MG", "Pouso Alegre", "Patrocinense",
            "Democrata-GV", "Ipatinga", "Rio Branco-ES", "Desportiva", "Vitória-ES", "Serra",
        ],
    ),
    (
        "Sudeste Sul",
        [
            "Volta Redonda", "Nova Iguaçu", "Portuguesa-RJ", "Madureira", "Bangu", "Boavista",
            "Audax-RJ", "Resende", "São José-SP", "Taubaté", "XV de Piracicaba", "Noroeste",
        ],
    ),
    (
        "Paulista",
        [
            "Novorizontino", "Mirassol", "Ituano", "Botafogo-SP", "Ferroviária", "Inter de Limeira",
            "Santo André", "São Bernardo FC", "Portuguesa", "Oeste", "Juventus-SP", "São Bento",
        ],
    ),
    (
        "Sul",
        [
            "Figueirense", "Brusque", "Joinville", "Marcílio Dias", "Londrina", "Operário-PR",
            "Paraná Clube", "Maringá", "Brasil de Pelotas", "Ypiranga", "Caxias", "São José-RS",
        ],
    ),
];

const COLLEGE2_CLUBS: [(&str, [&str; 12]); 8] = [
    (
        "Amazônica",
        [
            "Princesa do Solimões", "Fast Clube", "Galvez", "Plácido de Castro", "Real Ariquemes",
            "Ji-Paraná", "Ypiranga-AP", "Oratório", "Castanhal", "Cametá", "Bragantino-PA", "Tapajós",
        ],
    ),
    (
        "Nordeste Atlântico",
        [
            "Maranhão", "Imperatriz", "Parnahyba", "4 de Julho", "Globo", "Santa Cruz-RN",
            "Nacional de Patos", "Atlético-PB", "Iguatu", "Pacajus", "Caucaia", "Barbalha",
        ],
    ),
    (
        "Nordeste Sul",
        [
            "Central", "Maguary", "Afogados", "Salgueiro", "Murici", "Coruripe", "Cruzeiro-AL",
            "Lagarto", "Falcon", "Jacuipense", "Bahia de Feira", "Atlético-BA",
        ],
    ),
    (
        "Centro-Oeste",
        [
            "Iporá", "Crac", "Morrinhos", "Goianésia EC", "Paranoá", "Capital-DF", "Santa Maria",
            "Samambaia", "Operário-MS", "Costa Rica-MS", "Dourados", "Ivinhema",
        ],
    ),
    (
        "Sudeste Norte",
        [
            "Uberlândia", "URT", "Boa Esporte", "Tupi", "Betim", "Aymorés", "Nova Venécia",
            "Real Noroeste", "Estrela do Norte", "Linhares", "Valeriodoce", "Mamoré",
        ],
    ),
    (
        "Sudeste Sul",
        [
            "Olaria", "Americano", "Friburguense", "Cabofriense", "Maricá", "Sampaio Corrêa-RJ",
            "Comercial-SP", "Marília", "Rio Claro", "Velo Clube", "Primavera", "Capivariano",
        ],
    ),
    (
        "Paulista",
        [
            "Água Santa", "Linense", "Monte Azul", "Rio Preto", "Votuporanguense", "Sertãozinho",
            "Nacional-SP", "São Caetano", "Osasco Audax", "EC São Bernardo", "Desportivo Brasil",
            "União Suzano",
        ],
    ),
    (
        "Sul",
        [
            "Hercílio Luz", "Camboriú", "Concórdia", "Barra-SC", "FC Cascavel", "Cianorte", "Azuriz",
            "Rio Branco-PR", "Avenida", "Novo Hamburgo", "Aimoré", "Esportivo",
        ],
    ),
];

/// Clubs with a top-flight past start a little stronger.
const TRADITIONAL_CLUBS: [&str; 6] = [
    "Santa Cruz",
    "Náutico",
    "Paraná Clube",
    "Vila Nova",
    "Figueirense",
    "Novorizontino",
];

const TRADITION_BONUS: i32 = 3;

pub struct CollegeDatabaseBuilder;

impl CollegeDatabaseBuilder {
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> CollegeDatabaseEntity {
        let college1 = Self::tier(&COLLEGE1_CLUBS, rng, |name, rng| {
            let rating = IntegerUtils::random(rng, 68, 78);
            if TRADITIONAL_CLUBS.contains(&name) {
                rating + TRADITION_BONUS
            } else {
                rating
            }
        });

        let college2 = Self::tier(&COLLEGE2_CLUBS, rng, |_, rng| IntegerUtils::random(rng, 55, 65));

        CollegeDatabaseEntity { college1, college2 }
    }

    pub fn write<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<CollegeDatabaseEntity, StorageError> {
        let database = Self::build(rng);

        fs::write(path, serde_json::to_string_pretty(&database)?)?;

        info!("college database written to {}: {} clubs", path.display(), database.len());

        Ok(database)
    }

    fn tier<R, F>(regions: &[(&str, [&str; 12])], rng: &mut R, rating: F) -> Vec<CollegeClubEntity>
    where
        R: Rng + ?Sized,
        F: Fn(&str, &mut R) -> i32,
    {
        regions
            .iter()
            .flat_map(|(region, names)| names.iter().map(move |name| (*region, *name)))
            .map(|(region, name)| CollegeClubEntity {
                name: name.to_string(),
                conference: region.to_string(),
                rating: rating(name, rng) as u8,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::CollegeLoader;
    use std::collections::HashMap;
    use unifut_core::utils::RandomUtils;

    #[test]
    fn every_region_gets_twelve_clubs_per_tier() {
        let database = CollegeDatabaseBuilder::build(&mut RandomUtils::seeded(Some(1)));

        assert_eq!(database.college1.len(), 96);
        assert_eq!(database.college2.len(), 96);

        for tier in [&database.college1, &database.college2] {
            let mut regions: HashMap<&str, usize> = HashMap::new();
            for club in tier {
                *regions.entry(&club.conference).or_default() += 1;
            }
            assert_eq!(regions.len(), 8);
            assert!(regions.values().all(|&count| count == 12));
        }
    }

    #[test]
    fn ratings_stay_in_tier_bands() {
        let database = CollegeDatabaseBuilder::build(&mut RandomUtils::seeded(Some(2)));

        for club in &database.college1 {
            if TRADITIONAL_CLUBS.contains(&club.name.as_str()) {
                assert!((71..=81).contains(&club.rating), "{} {}", club.name, club.rating);
            } else {
                assert!((68..=78).contains(&club.rating), "{} {}", club.name, club.rating);
            }
        }

        assert!(database.college2.iter().all(|c| (55..=65).contains(&c.rating)));
    }

    #[test]
    fn written_database_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams_db.json");

        let written = CollegeDatabaseBuilder::write(&path, &mut RandomUtils::seeded(Some(3))).unwrap();

        assert_eq!(CollegeLoader::load(&path), written);
    }
}
