pub fn main() {
    cgi_introspect::main(cgi_introspect::path_info::handler)
}
