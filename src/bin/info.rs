pub fn main() {
    cgi_introspect::main(cgi_introspect::sysinfo::handler)
}
