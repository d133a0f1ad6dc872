fn main() {
    lorentz_orbits::app::start();
}
