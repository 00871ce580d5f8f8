//! Phong shading with hard shadows, textures, checkerboard and bump maps.

use lumen_core::{Light, Object, Scene};
use lumen_math::{normalize, Color, Interval, Ray, Vec3, EPSILON};

use crate::hit::{any_hit, Hit};
use crate::surface::Surface;

/// Scale applied to decoded bump-map offsets.
pub const BUMP_STRENGTH: f64 = 0.05;

/// Weight of the specular term relative to diffuse.
const SPECULAR_WEIGHT: f64 = 0.5;

/// Shade the hit `hit` seen along `ray`.
pub fn shade(scene: &Scene, ray: &Ray, hit: Hit) -> Color {
    let object = &scene.objects[hit.object_index];
    let point = hit.point(ray);
    let (u, v) = object.shape.uv_at(point);

    let base = surface_color(object, point, (u, v), scene.checkerboard);

    let mut normal = object.shape.normal_at(point);
    if let Some(offsets) = object.texture.as_ref().and_then(|t| t.bump_at(u, v)) {
        normal = bump_normal(normal, offsets);
    }
    if normal.dot(ray.direction) > 0.0 {
        normal = -normal;
    }

    let view = -ray.direction;
    let ambient = (scene.ambient.color * base) * scene.ambient.ratio;

    scene.lights.iter().fold(ambient, |color, light| {
        color + light_contribution(scene, light, point, normal, view, base)
    })
}

/// Diffuse plus specular from one light, or black when it is occluded.
fn light_contribution(
    scene: &Scene,
    light: &Light,
    point: Vec3,
    normal: Vec3,
    view: Vec3,
    base: Color,
) -> Color {
    let to_light = light.position - point;
    let distance = to_light.length();
    let light_dir = normalize(to_light);

    if is_in_shadow(&scene.objects, point + normal * EPSILON, light_dir, distance) {
        return Color::BLACK;
    }

    let n_dot_l = normal.dot(light_dir);
    let diffuse = n_dot_l.max(0.0) * light.brightness;

    let reflected = normalize(normal * (2.0 * n_dot_l) - light_dir);
    let specular = view.dot(reflected).max(0.0).powf(light.specular_exponent) * light.brightness;

    (light.color * base) * diffuse + light.color * (specular * SPECULAR_WEIGHT)
}

/// True if anything lies between `origin` and a light `distance` away.
pub fn is_in_shadow(objects: &[Object], origin: Vec3, light_dir: Vec3, distance: f64) -> bool {
    let shadow_ray = Ray::new(origin, light_dir);
    any_hit(objects, &shadow_ray, Interval::new(EPSILON, distance))
}

/// Base colour at a surface point: texture, else checkerboard, else the object colour.
pub fn surface_color(object: &Object, point: Vec3, uv: (f64, f64), checkerboard: bool) -> Color {
    match &object.texture {
        Some(texture) => texture.sample(uv.0, uv.1),
        None if checkerboard => apply_checkerboard(object.color, point),
        None => object.color,
    }
}

/// Halve `color` on odd cells of a half-unit 3D checker lattice.
pub fn apply_checkerboard(color: Color, point: Vec3) -> Color {
    let cell = (point * 2.0).floor();
    let parity = [cell.x, cell.y, cell.z]
        .iter()
        .map(|&c| (c as i64).rem_euclid(2))
        .sum::<i64>();
    if parity % 2 == 0 {
        color
    } else {
        color.halved()
    }
}

/// Perturb `normal` by signed tangent/bitangent offsets from a bump map.
pub fn bump_normal(normal: Vec3, (du, dv): (f64, f64)) -> Vec3 {
    let tangent = if normal.x.abs() > 0.9 {
        Vec3::Y
    } else {
        normalize(Vec3::X.cross(normal))
    };
    let bitangent = normalize(normal.cross(tangent));

    normalize(normal + tangent * (du * BUMP_STRENGTH) + bitangent * (dv * BUMP_STRENGTH))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use lumen_core::{Ambient, Plane, Sphere, Texture};

    use crate::hit::closest_hit;

    fn primary(scene: &Scene, ray: &Ray) -> Color {
        let hit = closest_hit(&scene.objects, ray, Interval::new(EPSILON, f64::INFINITY)).unwrap();
        shade(scene, ray, hit)
    }

    /// Grey floor at y = -1 with an opaque sphere hovering above the origin.
    fn shadow_scene() -> Scene {
        let mut scene = Scene::new("shadow");
        scene.ambient = Ambient {
            ratio: 0.2,
            color: Color::WHITE,
        };
        scene.add_object(Object::new(
            Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
            Color::new(100, 100, 100),
        ));
        scene.add_object(Object::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.5), Color::WHITE));
        scene.add_light(Light::new(Vec3::new(0.0, 3.0, 0.0), 1.0, Color::WHITE));
        scene
    }

    #[test]
    fn test_shadowed_point_is_ambient_only() {
        let scene = shadow_scene();
        let floor_point = Vec3::new(0.0, -1.0, 0.0);

        assert!(is_in_shadow(
            &scene.objects,
            floor_point + Vec3::Y * EPSILON,
            Vec3::Y,
            4.0
        ));

        // look at the floor point from the side, missing the sphere
        let ray = Ray::new(Vec3::new(2.0, 1.0, 0.0), floor_point - Vec3::new(2.0, 1.0, 0.0));
        let hit = closest_hit(&scene.objects, &ray, Interval::new(EPSILON, f64::INFINITY)).unwrap();
        assert_eq!(hit.object_index, 0);
        assert_eq!(shade(&scene, &ray, hit), Color::new(20, 20, 20));
    }

    #[test]
    fn test_lit_point_is_brighter_than_ambient() {
        let scene = shadow_scene();
        let target = Vec3::new(3.0, -1.0, 0.0);
        let ray = Ray::new(Vec3::new(3.0, 1.0, -2.0), target - Vec3::new(3.0, 1.0, -2.0));

        assert!(!is_in_shadow(&scene.objects, target + Vec3::Y * EPSILON, normalize(Vec3::new(-3.0, 4.0, 0.0)), 5.0));
        let color = primary(&scene, &ray);
        assert!(color.r > 20);
    }

    #[test]
    fn test_light_beyond_blocker_distance_is_not_shadowed() {
        let scene = shadow_scene();
        // the sphere sits 1.5 units up; a light 1 unit up is in front of it
        assert!(!is_in_shadow(
            &scene.objects,
            Vec3::new(0.0, -1.0 + EPSILON, 0.0),
            Vec3::Y,
            1.0
        ));
    }

    #[test]
    fn test_direct_phong_values() {
        // sphere facing a head-on light: full diffuse and specular
        let mut scene = Scene::new("phong");
        scene.ambient = Ambient {
            ratio: 0.0,
            color: Color::WHITE,
        };
        scene.add_object(Object::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0), Color::new(200, 0, 0)));
        scene.add_light(Light::new(Vec3::ZERO, 0.5, Color::WHITE));

        let color = primary(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        // diffuse 200·0.5 = 100, specular 255·0.5·0.5 = 63
        assert_eq!(color, Color::new(163, 63, 63));
    }

    #[test]
    fn test_normal_faces_viewer_inside_sphere() {
        let mut scene = Scene::new("inside");
        scene.ambient = Ambient {
            ratio: 0.0,
            color: Color::WHITE,
        };
        scene.add_object(Object::new(Sphere::new(Vec3::ZERO, 5.0), Color::WHITE));
        scene.add_light(Light::new(Vec3::ZERO, 1.0, Color::WHITE));

        // from the centre every wall faces the light once the normal is flipped
        let color = primary(&scene, &Ray::new(Vec3::ZERO, Vec3::X));
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn test_checkerboard_parity() {
        let red = Color::new(200, 100, 50);
        assert_eq!(apply_checkerboard(red, Vec3::new(0.1, 0.1, 0.1)), red);
        assert_eq!(apply_checkerboard(red, Vec3::new(0.6, 0.1, 0.1)), Color::new(100, 50, 25));
        assert_eq!(apply_checkerboard(red, Vec3::new(0.6, 0.6, 0.1)), red);
        // negative coordinates use floor, not truncation
        assert_eq!(apply_checkerboard(red, Vec3::new(-0.1, 0.1, 0.1)), Color::new(100, 50, 25));
    }

    #[test]
    fn test_checkerboard_far_from_origin() {
        // every cell index saturates to i64::MAX, which is odd
        let red = Color::new(200, 100, 50);
        assert_eq!(apply_checkerboard(red, Vec3::splat(1e300)), Color::new(100, 50, 25));
        assert_eq!(apply_checkerboard(red, Vec3::new(1e300, 1e300, 0.1)), red);
    }

    #[test]
    fn test_surface_color_precedence() {
        let plain = Object::new(Sphere::new(Vec3::ZERO, 1.0), Color::new(200, 200, 200));
        let odd = Vec3::new(0.6, 0.1, 0.1);

        assert_eq!(surface_color(&plain, odd, (0.0, 0.0), false), Color::new(200, 200, 200));
        assert_eq!(surface_color(&plain, odd, (0.0, 0.0), true), Color::new(100, 100, 100));

        let texture = Arc::new(Texture::new(1, 1, vec![0x0000FFFF], "blue"));
        let textured = plain.with_texture(texture);
        assert_eq!(surface_color(&textured, odd, (0.3, 0.3), true), Color::new(0, 0, 255));
    }

    #[test]
    fn test_bump_normal() {
        // neutral texel leaves the normal untouched
        assert!((bump_normal(Vec3::Y, (0.0, 0.0)) - Vec3::Y).length() < 1e-12);

        let bumped = bump_normal(Vec3::Y, (1.0, 0.0));
        assert!((bumped.length() - 1.0).abs() < 1e-12);
        assert!(bumped.dot(Vec3::Y) < 1.0);

        // tangent switches to +Y for x-facing normals
        let side = bump_normal(Vec3::X, (1.0, 0.0));
        assert!(side.y > 0.0);
    }
}
