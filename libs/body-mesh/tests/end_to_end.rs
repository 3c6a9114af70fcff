use body_mesh::{BodyGenerator, DensityField, GeneratorConfig, NeighborSearch, ScalarField};
use body_skeleton::SkeletonChain;
use config::constants::PROJECTION_TOLERANCE;
use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two nodes two units apart, linked both ways.
fn capsule_chain() -> SkeletonChain {
    let mut chain = SkeletonChain::new();
    let a = chain.add_node(DVec3::ZERO, 0.5, 0.5).unwrap();
    let b = chain.add_node(DVec3::new(2.0, 0.0, 0.0), 0.5, 0.5).unwrap();
    chain.link(a, b).unwrap();
    chain
}

/// Normalized distance at which `exp(-4 d^2)` equals `threshold`.
fn surface_distance(threshold: f64) -> f64 {
    (-threshold.ln() / 4.0).sqrt()
}

#[test]
fn capsule_generates_surface_and_mesh() {
    let chain = capsule_chain();
    let config = GeneratorConfig {
        surface_threshold: 0.5,
        ..GeneratorConfig::seeded(2024)
    };
    let mut generator = BodyGenerator::new(config.clone());
    let mesh = generator.generate(&chain).clone();
    let points = generator.points();
    let field = DensityField::new(&chain);

    assert!(!points.is_empty());

    // Tolerance band of the normalized distance around the isosurface
    let inner = surface_distance(0.5 + PROJECTION_TOLERANCE);
    let outer = surface_distance(0.5 - PROJECTION_TOLERANCE);
    for p in points {
        let d = field.normalized_distance(p.position);
        assert!(d > inner && d < outer, "sample at distance {d}");
        // Samples hug the capsule between the two nodes
        assert!(p.position.x > -0.5 && p.position.x < 2.5);
        assert!(p.position.y.abs() < 0.5 && p.position.z.abs() < 0.5);
    }

    assert!(mesh.triangle_count() > 0);
    assert_eq!(mesh.vertex_count(), mesh.triangle_count() * 3);
    assert_eq!(mesh.normals().map(<[DVec3]>::len), Some(mesh.vertex_count()));
    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_positions(t);
        for (p, q) in [(a, b), (b, c), (c, a)] {
            assert!((p - q).length() <= config.max_triangulation_distance + 1e-9);
        }
    }

    let bounds = mesh.bounds();
    for v in mesh.vertices() {
        assert!(bounds.contains(*v));
    }
}

#[test]
fn grid_and_brute_force_generate_identical_meshes() {
    let chain = capsule_chain();
    let base = GeneratorConfig {
        max_surface_samples: 120,
        ..GeneratorConfig::seeded(77)
    };
    let brute = GeneratorConfig {
        neighbor_search: NeighborSearch::BruteForce,
        ..base.clone()
    };

    let mut grid_generator = BodyGenerator::new(base);
    let mut brute_generator = BodyGenerator::new(brute);
    let grid_mesh = grid_generator.generate(&chain).clone();
    let brute_mesh = brute_generator.generate(&chain).clone();

    assert_eq!(grid_generator.points(), brute_generator.points());
    assert_eq!(grid_mesh, brute_mesh);
}

#[test]
fn injected_rng_matches_configured_seed() {
    let chain = capsule_chain();
    let config = GeneratorConfig {
        max_surface_samples: 100,
        ..GeneratorConfig::seeded(5)
    };

    let mut seeded = BodyGenerator::new(config.clone());
    let from_seed = seeded.generate(&chain).clone();

    let mut injected = BodyGenerator::new(GeneratorConfig { seed: None, ..config });
    let mut rng = StdRng::seed_from_u64(5);
    let from_rng = injected.generate_with_rng(&chain, &mut rng).clone();

    assert_eq!(from_seed, from_rng);
}

#[test]
fn empty_chain_yields_empty_mesh() {
    let chain = SkeletonChain::new();
    let mut generator = BodyGenerator::new(GeneratorConfig {
        max_surface_samples: 50,
        ..GeneratorConfig::seeded(1)
    });
    let mesh = generator.generate(&chain);
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.triangle_count(), 0);
    assert!(generator.points().is_empty());
}

#[test]
fn chain_edits_show_up_after_regenerate() {
    let mut chain = capsule_chain();
    let mut generator = BodyGenerator::new(GeneratorConfig {
        max_surface_samples: 150,
        ..GeneratorConfig::seeded(8)
    });
    generator.generate(&chain);

    let tail = chain.iter_ids().last().unwrap();
    chain.set_position(tail, DVec3::new(0.0, 2.0, 0.0)).unwrap();
    assert!(generator.regenerate(&chain));

    let field = DensityField::new(&chain);
    for p in generator.points() {
        assert!((field.density(p.position) - 0.5).abs() < PROJECTION_TOLERANCE);
        assert!(p.position.x.abs() < 0.5);
    }
}

#[test]
fn debug_point_radius_tracks_sample_density() {
    let generator = BodyGenerator::new(GeneratorConfig::default());
    assert!((generator.config().debug_point_radius() - 0.04).abs() < 1e-12);
}

#[test]
fn chain_spanning_the_float_range_generates_without_panicking() {
    let mut chain = SkeletonChain::new();
    chain.push_linked(DVec3::new(-1e308, 0.0, 0.0), 0.5, 0.5).unwrap();
    chain.push_linked(DVec3::new(1e308, 0.0, 0.0), 0.5, 0.5).unwrap();

    let mut generator = BodyGenerator::new(GeneratorConfig {
        max_surface_samples: 5,
        ..GeneratorConfig::seeded(3)
    });
    let mesh = generator.generate(&chain);
    assert!(mesh.validate());
    assert!(generator.points().len() <= 5);
}
