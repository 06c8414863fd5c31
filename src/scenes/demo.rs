use serde_json::{json, Value};

/// Floor, back wall, mirror, glass ball and an area light seen by a pinhole.
pub fn demo_scene_description() -> Value {
    return json!({
        "assets": {
            "white": {"type": "bsdf::diffuse", "R": [0.8, 0.8, 0.8]},
            "red": {"type": "bsdf::diffuse", "R": [0.75, 0.25, 0.25]},
            "mirror": {"type": "bsdf::mirror", "R": [0.95, 0.95, 0.95]},
            "glass": {"type": "bsdf::refract_all", "R": [1.0, 1.0, 1.0], "eta1": 1.0, "eta2": 1.5}
        },
        "primitives": [
            {
                "name": "floor",
                "shape": {"type": "quad", "p": [-2, 0, -2], "e1": [0, 0, 4], "e2": [4, 0, 0]},
                "bsdf": "white"
            },
            {
                "name": "back",
                "shape": {"type": "quad", "p": [-2, 0, -2], "e1": [4, 0, 0], "e2": [0, 3, 0]},
                "bsdf": "red"
            },
            {
                "name": "mirror",
                "shape": {"type": "quad", "p": [-1.9, 0.2, -1.5], "e1": [0, 2, 0], "e2": [0, 0, 2]},
                "bsdf": "mirror"
            },
            {
                "name": "ball",
                "shape": {"type": "sphere", "center": [0.6, 0.5, 0.0], "radius": 0.5},
                "bsdf": "glass"
            },
            {
                "name": "light",
                "shape": {"type": "quad", "p": [-0.5, 2.9, -0.5], "e1": [1, 0, 0], "e2": [0, 0, 1]},
                "light": {"type": "light::area", "Le": [10, 10, 10]}
            },
            {
                "name": "camera",
                "sensor": {
                    "type": "sensor::pinhole",
                    "eye": [0, 1.5, 5], "center": [0, 1, 0], "up": [0, 1, 0],
                    "fov": 40, "width": 64, "height": 48
                }
            }
        ]
    });
}

/// A diffuse floor lit by an area light off to the right of the view, which the camera
/// cannot see directly. Only `L D E` paths carry energy at three vertices.
pub fn diffuse_scene_description() -> Value {
    return json!({
        "primitives": [
            {
                "name": "floor",
                "shape": {"type": "quad", "p": [-3, 0, -3], "e1": [0, 0, 6], "e2": [6, 0, 0]},
                "bsdf": {"type": "bsdf::diffuse", "R": [0.7, 0.7, 0.7]}
            },
            {
                "name": "light",
                "shape": {"type": "quad", "p": [0.5, 2.9, -0.5], "e1": [1, 0, 0], "e2": [0, 0, 1]},
                "light": {"type": "light::area", "Le": [8, 8, 8]}
            },
            {
                "name": "camera",
                "sensor": {
                    "type": "sensor::pinhole",
                    "eye": [0, 1, 5], "center": [0, 0, 0], "up": [0, 1, 0],
                    "fov": 40, "width": 32, "height": 32
                }
            }
        ]
    });
}
