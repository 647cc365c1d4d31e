fn main() {
	docsite_enhance::init_logging();
	docsite_enhance::start();
}
