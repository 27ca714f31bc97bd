use gyrocompass::{Compass, SensorReading};
use nalgebra::Vector3;

fn main() {
    env_logger::init();

    let compass = Compass::new();
    compass.start();
    compass.subscribe(|heading| {
        println!("Heading: {heading}");
    });

    let gravity_feed = compass.gravity_feed();
    let geomagnetic_feed = compass.geomagnetic_feed();

    for step in 0..10 {
        // this loop stands in for the two sensor callbacks; replace the
        // vectors with actual accelerometer (m/s²) and magnetometer (µT)
        // readings delivered on their own cadences
        let turn = (step as f32 * 36.0).to_radians();

        gravity_feed.push(SensorReading::from_vector(Vector3::new(0.0, 9.81, 0.0)));
        geomagnetic_feed.push(SensorReading::from_vector(Vector3::new(
            -48.0 * turn.sin(),
            0.0,
            -48.0 * turn.cos(),
        )));
    }

    compass.stop();
}
