use std::collections::HashMap;

use nalgebra::Point3;
use tracing::{debug, trace};

use crate::astro::{
    derive_speeds, solve_dependent_position, Orbit, ReferenceFrame, SolvedState,
};
use crate::error::{ConfigError, ConfigResult};

mod body;

pub use body::{Body, BodyID, BodyInfo, BodyState, OrbitalParams};

/// A fully-configured set of bodies. Immutable once built; everything that
/// changes over time comes out of [Orrery::tick].
#[derive(Debug, Clone)]
pub struct Orrery {
    // Indexed by BodyID. A satellite always comes after its primary.
    bodies: Vec<Body>,
    reference_id: BodyID,
    frame: ReferenceFrame,
}

/// Collects bodies and checks them as they come in. The whole-system checks
/// (exactly one reference body) happen in [OrreryBuilder::build].
#[derive(Debug, Clone)]
pub struct OrreryBuilder {
    bodies: Vec<Body>,
    reference_id: Option<BodyID>,
    frame: ReferenceFrame,
}

impl OrreryBuilder {
    pub fn new(frame: ReferenceFrame) -> Self {
        OrreryBuilder {
            bodies: vec![],
            reference_id: None,
            frame,
        }
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    pub fn find_body(&self, name: &str) -> Option<BodyID> {
        find_by_name(&self.bodies, name)
    }

    pub fn add_fixed_body(&mut self, info: BodyInfo, rotation_period: f64) -> ConfigResult<BodyID> {
        self.check_new_name(&info.name)?;
        body::validate_rotation_period(&info.name, rotation_period)?;

        // Fixed bodies don't orbit, but they still spin like everyone else
        let rotation_speed = derive_speeds(rotation_period, 1.0, &self.frame).rotation;
        Ok(self.insert_new_body(info, BodyState::FixedAtOrigin { rotation_speed }))
    }

    /// Adds a body orbiting `parent_id`. If the parent is fixed at the origin,
    /// the new body gets a full elliptical orbit; if the parent is itself
    /// orbiting, the new body becomes its satellite.
    pub fn add_body(
        &mut self,
        info: BodyInfo,
        params: OrbitalParams,
        parent_id: BodyID,
    ) -> ConfigResult<BodyID> {
        self.check_new_name(&info.name)?;
        params.validate(&info.name)?;

        let speeds = derive_speeds(params.rotation_period, params.orbital_period, &self.frame);
        let parent = self.get_builder_body(parent_id)?;
        let state = match parent.state {
            BodyState::FixedAtOrigin { .. } => BodyState::Orbiting {
                parent_id,
                orbit: Orbit::new(
                    params.semimajor_axis,
                    params.eccentricity,
                    params.inclination_degrees,
                    speeds,
                ),
            },
            BodyState::Orbiting { .. } => {
                for (column, value) in [
                    ("eccentricity", params.eccentricity),
                    ("inclination", params.inclination_degrees),
                ] {
                    if value != 0.0 {
                        return Err(ConfigError::SatelliteShape {
                            name: info.name,
                            column,
                            value,
                        });
                    }
                }
                BodyState::Satellite {
                    primary_id: parent_id,
                    radius: params.semimajor_axis,
                    speeds,
                }
            }
            BodyState::Satellite { .. } => {
                return Err(ConfigError::NestedSatellite {
                    name: info.name,
                    primary: parent.info.name.clone(),
                })
            }
        };

        Ok(self.insert_new_body(info, state))
    }

    /// Marks the body whose orbit defines the unit of angular speed. Its
    /// orbital period has to be exactly one, since all periods are measured
    /// in its years.
    pub fn set_reference_body(&mut self, id: BodyID) -> ConfigResult<()> {
        let body = self.get_builder_body(id)?;
        if let Some(existing) = self.reference_id {
            return Err(ConfigError::MultipleReferenceBodies(
                self.bodies[existing.0].info.name.clone(),
                body.info.name.clone(),
            ));
        }

        let speed = match body.speeds() {
            Some(speeds) => speeds.orbit,
            None => return Err(ConfigError::FixedReferenceBody(body.info.name.clone())),
        };
        if !is_reference_speed(speed, &self.frame) {
            return Err(ConfigError::ReferencePeriodNotUnit {
                name: body.info.name.clone(),
                value: self.frame.angular_speed / speed,
            });
        }

        self.reference_id = Some(id);
        Ok(())
    }

    pub fn build(self) -> ConfigResult<Orrery> {
        let reference_id = self.reference_id.ok_or(ConfigError::NoReferenceBody)?;
        debug!(
            "Built orrery with {} bodies, reference body {}",
            self.bodies.len(),
            self.bodies[reference_id.0].info.name
        );
        Ok(Orrery {
            bodies: self.bodies,
            reference_id,
            frame: self.frame,
        })
    }

    fn get_builder_body(&self, id: BodyID) -> ConfigResult<&Body> {
        self.bodies.get(id.0).ok_or(ConfigError::UnknownBodyID(id.0))
    }

    fn check_new_name(&self, name: &str) -> ConfigResult<()> {
        match find_by_name(&self.bodies, name) {
            Some(_) => Err(ConfigError::DuplicateBody(name.to_owned())),
            None => Ok(()),
        }
    }

    fn insert_new_body(&mut self, info: BodyInfo, state: BodyState) -> BodyID {
        let id = BodyID(self.bodies.len());
        debug!("Adding body {:?} ({}): {:?}", id, info.name, state);
        self.bodies.push(Body { id, info, state });
        id
    }
}

// Has to be exact, so the reference body's speed is the frame's speed bit for bit
#[allow(clippy::float_cmp)]
fn is_reference_speed(speed: f64, frame: &ReferenceFrame) -> bool {
    speed == frame.angular_speed
}

fn find_by_name(bodies: &[Body], name: &str) -> Option<BodyID> {
    bodies
        .iter()
        .find(|body| body.info.name.eq_ignore_ascii_case(name))
        .map(|body| body.id)
}

impl Orrery {
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn find_body(&self, name: &str) -> Option<&Body> {
        find_by_name(&self.bodies, name).map(|id| self.get_body(id))
    }

    pub fn get_parent(&self, id: BodyID) -> Option<BodyID> {
        self.bodies[id.0].parent_id()
    }

    pub fn satellites_of(&self, id: BodyID) -> impl Iterator<Item = &Body> + '_ {
        self.bodies().filter(move |body| match body.state {
            BodyState::Satellite { primary_id, .. } => primary_id == id,
            _ => false,
        })
    }

    pub fn reference_body(&self) -> &Body {
        self.get_body(self.reference_id)
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    /// Solves every body at `time`. Bodies around the origin go first, then
    /// satellites get their primary's freshly solved position.
    pub fn tick(&self, time: f64) -> HashMap<BodyID, SolvedState> {
        let mut solved = HashMap::with_capacity(self.bodies.len());

        for body in self.bodies.iter() {
            let state = match &body.state {
                BodyState::FixedAtOrigin { rotation_speed } => SolvedState {
                    position: Point3::origin(),
                    rotation_angle: time * rotation_speed,
                },
                BodyState::Orbiting { orbit, .. } => orbit.state_at_time(time),
                BodyState::Satellite { .. } => continue,
            };
            solved.insert(body.id, state);
        }

        for body in self.bodies.iter() {
            if let BodyState::Satellite {
                primary_id,
                radius,
                speeds,
            } = &body.state
            {
                let primary_position = solved[primary_id].position;
                let state = SolvedState {
                    position: solve_dependent_position(
                        time,
                        &primary_position,
                        *radius,
                        speeds.orbit,
                    ),
                    rotation_angle: time * speeds.rotation,
                };
                solved.insert(body.id, state);
            }
        }

        trace!("Solved {} bodies at t = {}", solved.len(), time);
        solved
    }
}
