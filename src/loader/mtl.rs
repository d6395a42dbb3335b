//! Wavefront MTL subset parser.
//!
//! The recognized keywords form a closed enum with an explicit match, so
//! an unrecognized keyword is a detectable, recoverable case (warn and
//! skip the line) instead of a lookup failure.

use std::str::FromStr;

use log::{trace, warn};

/// One material record, keyed by the `newmtl` name that opened it.
///
/// The crate attaches no rendering semantics to these values; they are
/// handed to the renderer boundary as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// `Ka`
    pub ambient: [f32; 3],
    /// `Kd`
    pub diffuse: [f32; 3],
    /// `Ks`
    pub specular: [f32; 3],
    /// `Ke`
    pub emissive: [f32; 3],
    /// `Ns`
    pub shininess: f32,
    /// `Ni` (optical density)
    pub ior: f32,
    /// `d` (opacity; 1.0 is fully opaque)
    pub dissolve: f32,
    /// `illum`
    pub illum: u8,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [0.0; 3],
            diffuse: [0.8, 0.8, 0.8],
            specular: [0.0; 3],
            emissive: [0.0; 3],
            shininess: 0.0,
            ior: 1.0,
            dissolve: 1.0,
            illum: 1,
        }
    }
}

/// The closed set of recognized MTL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MtlKeyword {
    NewMtl,
    Shininess,
    Ambient,
    Diffuse,
    Specular,
    Emissive,
    OpticalDensity,
    Dissolve,
    Illum,
    /// Texture map statements are recognized so they don't warn, but
    /// texture loading is out of scope and they carry no data here.
    TextureMap,
}

/// Keyword not in the recognized set.
struct UnknownKeyword;

impl FromStr for MtlKeyword {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, UnknownKeyword> {
        Ok(match s {
            "newmtl" => Self::NewMtl,
            "Ns" => Self::Shininess,
            "Ka" => Self::Ambient,
            "Kd" => Self::Diffuse,
            "Ks" => Self::Specular,
            "Ke" => Self::Emissive,
            "Ni" => Self::OpticalDensity,
            "d" => Self::Dissolve,
            "illum" => Self::Illum,
            "map_Ka" | "map_Kd" | "map_Ks" | "map_Ns" | "map_d" | "map_Bump" | "map_bump"
            | "bump" => Self::TextureMap,
            _ => return Err(UnknownKeyword),
        })
    }
}

/// Parses MTL `text` into the materials it defines, in definition order.
///
/// Unrecognized keywords, statements appearing before the first
/// `newmtl`, and unparsable arguments are all logged and skipped.
pub fn parse_mtl(text: &str) -> Vec<Material> {
    let mut materials: Vec<Material> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(raw_keyword) = tokens.next() else {
            continue;
        };
        let Ok(keyword) = raw_keyword.parse::<MtlKeyword>() else {
            warn!("line {}: unrecognized material keyword {:?}, skipping", lineno, raw_keyword);
            continue;
        };

        if keyword == MtlKeyword::NewMtl {
            match tokens.next() {
                Some(name) => materials.push(Material::new(name)),
                None => warn!("line {}: newmtl without a name, skipping", lineno),
            }
            continue;
        }
        if keyword == MtlKeyword::TextureMap {
            trace!("line {}: ignoring texture map statement {:?}", lineno, raw_keyword);
            continue;
        }

        let Some(material) = materials.last_mut() else {
            warn!("line {}: {:?} before any newmtl, skipping", lineno, raw_keyword);
            continue;
        };
        let args: Vec<&str> = tokens.collect();
        let applied = match keyword {
            MtlKeyword::Shininess => parse_scalar(&args, &mut material.shininess),
            MtlKeyword::Ambient => parse_color(&args, &mut material.ambient),
            MtlKeyword::Diffuse => parse_color(&args, &mut material.diffuse),
            MtlKeyword::Specular => parse_color(&args, &mut material.specular),
            MtlKeyword::Emissive => parse_color(&args, &mut material.emissive),
            MtlKeyword::OpticalDensity => parse_scalar(&args, &mut material.ior),
            MtlKeyword::Dissolve => parse_scalar(&args, &mut material.dissolve),
            MtlKeyword::Illum => match args.first().and_then(|a| a.parse().ok()) {
                Some(model) => {
                    material.illum = model;
                    true
                }
                None => false,
            },
            MtlKeyword::NewMtl | MtlKeyword::TextureMap => unreachable!("handled above"),
        };
        if !applied {
            warn!("line {}: malformed arguments for {:?}, skipping", lineno, raw_keyword);
        }
    }

    materials
}

fn parse_scalar(args: &[&str], out: &mut f32) -> bool {
    match args.first().and_then(|a| a.parse().ok()) {
        Some(v) => {
            *out = v;
            true
        }
        None => false,
    }
}

fn parse_color(args: &[&str], out: &mut [f32; 3]) -> bool {
    let parsed: Vec<f32> = args.iter().filter_map(|a| a.parse().ok()).collect();
    if parsed.len() < 3 {
        return false;
    }
    out.copy_from_slice(&parsed[..3]);
    true
}
