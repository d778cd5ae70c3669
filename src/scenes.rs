//! Scene configuration loader.
//!
//! Each demo is described by a YAML file, so set-ups can be tweaked
//! without recompiling:
//!
//! ```text
//! scenes/
//! ├── billiard.yaml
//! └── cannonball.yaml
//! ```
//!
//! A scene pins everything `World` needs: gravity, bounds, restitution,
//! sub-steps, integration method, collision policy, and the initial ball
//! list. Built worlds start Idle; the caller decides when to `start()`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::integrator::IntegrationMethod;
use crate::types::{Body, Bounds, Vec2};
use crate::world::{CollisionPolicy, World, WorldError};

/// Error type for scene loading and building.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scene not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    World(#[from] WorldError),
}

/// One ball in a scene. `mass` defaults to the disc area and `colour`
/// to a neutral grey when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallConfig {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub restitution: Option<f64>,
    #[serde(default)]
    pub colour: Option<[u8; 3]>,
}

impl BallConfig {
    fn to_body(&self) -> Body {
        let mut body = match self.mass {
            Some(mass) => Body::new(self.radius, mass, self.pos, self.vel),
            None => Body::from_radius(self.radius, self.pos, self.vel),
        };
        body.restitution = self.restitution;
        if let Some(colour) = self.colour {
            body = body.with_colour(colour);
        }
        body
    }
}

/// A complete demo set-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub gravity: Vec2,
    pub bounds: Bounds,
    pub restitution: f64,
    pub sub_steps: u32,
    #[serde(default)]
    pub integration: IntegrationMethod,
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
    pub balls: Vec<BallConfig>,
}

impl SceneConfig {
    /// Build a populated, Idle world. Validation goes through the world's
    /// own setters, so a bad scene fails the same way a bad caller does.
    pub fn build(&self) -> Result<World, SceneError> {
        let mut world = World::new(Bounds::default());
        world.set_bounds(self.bounds)?;
        world.set_gravity(self.gravity);
        world.set_restitution(self.restitution)?;
        world.set_sub_steps(self.sub_steps)?;
        world.set_integration_method(self.integration);
        world.set_collision_policy(self.collision_policy);

        for ball in &self.balls {
            world.add(ball.to_body())?;
        }
        Ok(world)
    }
}

/// Scene loader with a configurable base directory.
pub struct SceneLoader {
    base_path: PathBuf,
}

impl SceneLoader {
    /// Create a new loader. The base path is the directory holding the
    /// `*.yaml` scene files.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a scene by name (without the .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = SceneLoader::new("scenes");
    /// let billiard = loader.load("billiard")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SceneConfig, SceneError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SceneError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let config: SceneConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// List all available scenes, sorted by name.
    pub fn list(&self) -> Result<Vec<String>, SceneError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scenes_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("scenes")
    }

    #[test]
    fn test_load_billiard_scene() {
        let loader = SceneLoader::new(scenes_path());
        let result = loader.load("billiard");

        assert!(result.is_ok(), "should load billiard: {:?}", result.err());
        let scene = result.unwrap();
        assert_eq!(scene.name, "billiard");
        assert_eq!(scene.gravity, Vec2::ZERO);
        assert!(!scene.balls.is_empty());
    }

    #[test]
    fn test_load_cannonball_scene() {
        let loader = SceneLoader::new(scenes_path());
        let scene = loader.load("cannonball").expect("should load cannonball");

        assert_eq!(scene.integration, IntegrationMethod::Rk4);
        assert_eq!(scene.balls.len(), 1);
        assert!(scene.gravity.y < 0.0);
    }

    #[test]
    fn test_load_nonexistent_scene() {
        let loader = SceneLoader::new(scenes_path());
        let result = loader.load("no_such_scene_xyz");

        match result {
            Err(SceneError::NotFound(name)) => assert_eq!(name, "no_such_scene_xyz"),
            other => panic!("expected NotFound, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_list_scenes() {
        let loader = SceneLoader::new(scenes_path());
        let names = loader.list().expect("should list scenes");

        assert!(names.contains(&"billiard".to_string()));
        assert!(names.contains(&"cannonball".to_string()));
    }

    #[test]
    fn test_build_world_from_scene() {
        let loader = SceneLoader::new(scenes_path());
        let scene = loader.load("billiard").unwrap();
        let world = scene.build().expect("scene should build");

        assert_eq!(world.len(), scene.balls.len());
        assert_eq!(world.state(), crate::world::SimState::Idle);
        assert_eq!(world.restitution(), scene.restitution);
        assert_eq!(world.sub_steps(), scene.sub_steps);
    }

    #[test]
    fn test_mass_defaults_to_disc_area() {
        let config = BallConfig {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            mass: None,
            restitution: None,
            colour: None,
        };
        let body = config.to_body();
        assert!((body.mass - std::f64::consts::PI * 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_scene_restitution_rejected() {
        let scene = SceneConfig {
            name: "bad".to_string(),
            gravity: Vec2::ZERO,
            bounds: Bounds::from_size(10.0, 10.0),
            restitution: 1.5,
            sub_steps: 1,
            integration: IntegrationMethod::default(),
            collision_policy: CollisionPolicy::default(),
            balls: vec![],
        };
        assert!(matches!(scene.build(), Err(SceneError::World(_))));
    }
}
