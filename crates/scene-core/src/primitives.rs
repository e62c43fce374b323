//! Simple solids for the dinner scene, built by revolving a 2D profile about Y.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::mesh::{Mesh, Vertex};

/// Revolve `profile` points `(radius, y)`, listed top to bottom, around the
/// Y axis.
pub fn lathe(profile: &[Vec2], segments: u32) -> Mesh {
    let segments = segments.max(3);
    let ring = segments + 1;
    let mut mesh = Mesh::default();
    for p in profile {
        for j in 0..ring {
            let phi = j as f32 / segments as f32 * TAU;
            let pos = Vec3::new(p.x * phi.sin(), p.y, p.x * phi.cos());
            mesh.vertices.push(Vertex::new(pos, Vec3::Y));
        }
    }
    for i in 0..profile.len().saturating_sub(1) as u32 {
        for j in 0..segments {
            let a = i * ring + j;
            let b = (i + 1) * ring + j;
            let c = b + 1;
            let d = a + 1;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh.compute_normals();
    mesh
}

/// UV sphere covering polar angles `[0, theta_length]` measured from +Y.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32, theta_length: f32) -> Mesh {
    let rows = height_segments.max(2);
    let profile = (0..=rows)
        .map(|i| {
            let theta = i as f32 / rows as f32 * theta_length;
            Vec2::new(radius * theta.sin(), radius * theta.cos())
        })
        .collect::<Vec<_>>();
    lathe(&profile, width_segments)
}

/// Closed cylinder (a cone when `radius_top` is zero), centred on the origin.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Mesh {
    let h = height * 0.5;
    // rim points are doubled so cap and wall normals stay separate
    let profile = [
        Vec2::new(0.0, h),
        Vec2::new(radius_top, h),
        Vec2::new(radius_top, h),
        Vec2::new(radius_bottom, -h),
        Vec2::new(radius_bottom, -h),
        Vec2::new(0.0, -h),
    ];
    lathe(&profile, radial_segments)
}

pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Mesh {
    cylinder(0.0, radius, height, radial_segments)
}

/// Capsule of total height `length + 2·radius`.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> Mesh {
    let caps = cap_segments.max(1);
    let h = length * 0.5;
    let mut profile = Vec::with_capacity(2 * caps as usize + 2);
    for i in 0..=caps {
        let theta = i as f32 / caps as f32 * FRAC_PI_2;
        profile.push(Vec2::new(radius * theta.sin(), h + radius * theta.cos()));
    }
    for i in 0..=caps {
        let theta = FRAC_PI_2 + i as f32 / caps as f32 * FRAC_PI_2;
        profile.push(Vec2::new(radius * theta.sin(), -h + radius * theta.cos()));
    }
    lathe(&profile, radial_segments)
}

/// Flat disc in the XY plane facing +Z.
pub fn disc(radius: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut mesh = Mesh::default();
    mesh.vertices.push(Vertex::new(Vec3::ZERO, Vec3::Z));
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        mesh.vertices
            .push(Vertex::new(Vec3::new(radius * a.cos(), radius * a.sin(), 0.0), Vec3::Z));
    }
    for i in 1..=segments {
        mesh.indices.extend_from_slice(&[0, i, i + 1]);
    }
    mesh
}

/// Full sphere shorthand.
pub fn ball(radius: f32, segments: u32) -> Mesh {
    sphere(radius, segments, segments, PI)
}
