//! Small in-memory copy of the two dashboard tables shared by unit tests.

use super::loader::{DataSource, InMemorySource};
use super::model::Dataset;

pub const HEI_CSV: &str = "\
UKPRN,HE Provider,Region of HE provider,lat,lon
10007792,University of Exeter,South West,50.7371,-3.5351
10007850,University of Bath,South West,51.3782,-2.3264
10007784,University College London,London,51.5246,-0.1340
10003645,King's College London,London,51.5115,-0.1160
10007825,Guildhall School of Music & Drama,London,51.5200,-0.0920
10007799,Newcastle University,North East,54.9790,-1.6147
10005553,Royal Northern College of Music,North West,,
10007843,\"St Mary's University, Twickenham\",London,51.4370,-0.3370
";

pub const ENTRY_CSV: &str = "\
Academic Year,HE Provider,Class,Category marker,Category,Value
2021/22,University of Exeter,Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),25400000
2021/22,University of Exeter,Emissions and waste,Carbon reduction,Total scope 1 and 2 carbon emissions (Kg CO2e),25400000
2020/21,University of Exeter,Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),27000000
2021/22,University of Exeter,Emissions and waste,Waste,Total waste (tonnes),3200
2021/22,University of Bath,Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),17500000
2020/21,University of Bath,Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),18000000
2020/21,University of Bath,Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),18000000
2021/22,University College London,Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),41000000
2021/22,University of Exeter,Building and spaces,Environmental management,Environmental management system external verification,Yes
2021/22,University of Exeter,Building and spaces,Floor area,Gross internal area (m2),610000
2021/22,University of Bath,Building and spaces,Floor area,Gross internal area (m2),380000
2021/22,University of Bath,Building and spaces,Environmental management,Environmental management system external verification,No
2021/22,University College London,Building and spaces,Floor area,Gross internal area (m2),900000
2021/22,University College London,Building and spaces,Floor area,Non-residential floor area (m2),not available
2021/22,King's College London,Building and spaces,Floor area,Non-residential floor area (m2),420000
2021/22,University of Exeter,Energy,Energy consumption,Total energy consumption (kWh),110000000
2018/19,University of Exeter,Energy,Energy consumption,Total energy consumption (kWh),120000000
2019/20,University of Exeter,Energy,Energy consumption,Total energy consumption (kWh),118000000
2019/20,University of Exeter,Energy,Energy consumption,Renewable energy (kWh),5000000
2020/21,University of Exeter,Energy,Energy consumption,Renewable energy (kWh),6000000
2021/22,University of Exeter,Energy,Energy sources,Grid electricity (kWh),40000000
2021/22,University of Bath,Energy,Energy consumption,Total energy consumption (kWh),70000000
2021/22,University of Exeter,Finances and people,Finances,Total income (£),567800000
2021/22,University of Bath,Finances and people,Finances,Total income (£),358000000
2020/21,Newcastle University,Finances and people,Finances,Total income (£),520000000
2021/22,\"St Mary's University, Twickenham\",Finances and people,Finances,Total income (£),
2021/22,\"St Mary's University, Twickenham\",Emissions and waste,Scope 1 and 2,Total scope 1 and 2 carbon emissions (Kg CO2e),n/a
2021/22,Newcastle University,Transport and environment,Travel,Staff commuting by car (%),21.5
";

pub fn source() -> InMemorySource {
    InMemorySource::new(HEI_CSV, ENTRY_CSV)
}

pub fn dataset() -> Dataset {
    source().load().expect("fixture CSV parses")
}
